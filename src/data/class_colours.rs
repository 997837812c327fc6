use image::Rgb;

/// Colour used when a class has no table entry.
pub const FALLBACK_COLOUR: Rgb<u8> = Rgb([0, 0, 255]);

/// The 80 classes a COCO-trained detector can emit, in model order. Also the
/// label list of last resort when neither a labels file nor model metadata is
/// available.
pub const COCO_CLASSES: [&str; 80] = [
    "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck", "boat",
    "traffic light", "fire hydrant", "stop sign", "parking meter", "bench", "bird", "cat", "dog",
    "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe", "backpack", "umbrella",
    "handbag", "tie", "suitcase", "frisbee", "skis", "snowboard", "sports ball", "kite",
    "baseball bat", "baseball glove", "skateboard", "surfboard", "tennis racket", "bottle",
    "wine glass", "cup", "fork", "knife", "spoon", "bowl", "banana", "apple", "sandwich",
    "orange", "broccoli", "carrot", "hot dog", "pizza", "donut", "cake", "chair", "couch",
    "potted plant", "bed", "dining table", "toilet", "tv", "laptop", "mouse", "remote",
    "keyboard", "cell phone", "microwave", "oven", "toaster", "sink", "refrigerator", "book",
    "clock", "vase", "scissors", "teddy bear", "hair drier", "toothbrush",
];

/// Stroke colour for a class's bounding box outline. Every COCO class has an
/// explicit entry; anything else is `None` so a coverage gap is observable.
pub fn colour_for_class(label: &str) -> Option<Rgb<u8>> {
    match label {
        // people
        "person" => Some(Rgb([128, 0, 128])),
        // vehicles
        "bicycle" | "car" | "motorcycle" | "airplane" | "bus" | "train" | "truck" | "boat" => {
            Some(Rgb([0, 255, 0]))
        }
        // street furniture
        "traffic light" | "fire hydrant" | "stop sign" | "parking meter" | "bench" => {
            Some(Rgb([255, 165, 0]))
        }
        // animals
        "bird" | "cat" | "dog" | "horse" | "sheep" | "cow" | "elephant" | "bear" | "zebra"
        | "giraffe" => Some(Rgb([255, 0, 0])),
        // carried items
        "backpack" | "umbrella" | "handbag" | "tie" | "suitcase" => Some(Rgb([0, 255, 255])),
        // sports gear
        "frisbee" | "skis" | "snowboard" | "sports ball" | "kite" | "baseball bat"
        | "baseball glove" | "skateboard" | "surfboard" | "tennis racket" => {
            Some(Rgb([255, 255, 0]))
        }
        // tableware
        "bottle" | "wine glass" | "cup" | "fork" | "knife" | "spoon" | "bowl" => {
            Some(Rgb([255, 0, 255]))
        }
        // food
        "banana" | "apple" | "sandwich" | "orange" | "broccoli" | "carrot" | "hot dog" | "pizza"
        | "donut" | "cake" => Some(Rgb([0, 128, 0])),
        // furniture
        "chair" | "couch" | "potted plant" | "bed" | "dining table" | "toilet" => {
            Some(Rgb([128, 64, 0]))
        }
        // electronics and appliances
        "tv" | "laptop" | "mouse" | "remote" | "keyboard" | "cell phone" | "microwave" | "oven"
        | "toaster" | "sink" | "refrigerator" => Some(Rgb([0, 64, 255])),
        // household
        "book" | "clock" | "vase" | "scissors" | "teddy bear" | "hair drier" | "toothbrush" => {
            Some(Rgb([128, 128, 128]))
        }
        _ => None,
    }
}

pub fn colour_or_fallback(label: &str) -> Rgb<u8> {
    colour_for_class(label).unwrap_or(FALLBACK_COLOUR)
}

/// Checks that every label a detector can emit has a table entry. A miss is a
/// configuration defect reported with the exact missing names.
pub fn verify_coverage<'a, I>(labels: I) -> Result<(), Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut missing: Vec<String> = labels
        .into_iter()
        .filter(|label| colour_for_class(label).is_none())
        .map(str::to_string)
        .collect();
    missing.dedup();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}
