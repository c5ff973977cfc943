use rust_embed::RustEmbed;

/// Static files served under `/static/`.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;
