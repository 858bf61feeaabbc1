pub mod student_handler;
