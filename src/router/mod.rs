pub mod student_router;
