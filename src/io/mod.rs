//! Line-oriented file formats, producing and consuming domain objects.

pub mod bed;
pub mod bedpe;
pub mod factera;
