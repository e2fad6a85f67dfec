//! Helpers shared by engine tasks.

pub mod seeding;
