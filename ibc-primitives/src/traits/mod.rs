mod encoding;

pub use encoding::*;
