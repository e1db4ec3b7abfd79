mod canvas;

pub use canvas::{BrailleCanvas, CLASS_NONE, CLASS_NO_DATA};
