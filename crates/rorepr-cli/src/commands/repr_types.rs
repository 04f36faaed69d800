use rorepr_core::RepresentationType;

pub fn run() {
    print!("{}", listing());
}

/// One line per representation type: its name and the media type it is served as.
pub fn listing() -> String {
    let width = RepresentationType::ALL
        .iter()
        .map(|t| t.to_string().len())
        .max()
        .unwrap_or(0);

    RepresentationType::ALL
        .iter()
        .map(|t| format!("{:width$}  {}\n", t.to_string(), t.media_type()))
        .collect()
}
