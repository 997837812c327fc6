mod class_colours;
mod display_fit;
mod gallery;
mod time_calc;

pub use class_colours::{
    colour_for_class, colour_or_fallback, verify_coverage, COCO_CLASSES, FALLBACK_COLOUR,
};
pub use display_fit::DisplayTransform;
pub use gallery::ImageGallery;
pub use time_calc::TimingTracker;
