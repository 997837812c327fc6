
mod detection;
mod inference_device;
mod model_config;
mod ovd_box;
mod ovd_image;

pub use detection::*;
pub use inference_device::*;
pub use model_config::*;
pub use ovd_box::*;
pub use ovd_image::*;
