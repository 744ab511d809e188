// src/models/mod.rs

pub mod chat;
pub mod exam_record;
pub mod question;
