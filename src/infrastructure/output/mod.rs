//! Download output adapters.

mod file_writer;

pub use file_writer::FileOutputWriter;
