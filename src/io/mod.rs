mod byte_reader;

pub use byte_reader::{ByteOrder, ByteReader};
