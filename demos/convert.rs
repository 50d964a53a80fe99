extern crate image as png;

// qoif imports
extern crate qoif;

use std::error::Error;
use std::path::Path;

/// Converts between png and qoif, choosing the direction by file extension.
///
/// `cargo run --example convert --features image -- input.png output.qoi`
fn main() -> Result<(), Box<dyn Error>> {
    use qoif::prelude::*;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let arguments: Vec<String> = std::env::args().skip(1).collect();
    let (input, output) = match arguments.as_slice() {
        [input, output] => (Path::new(input), Path::new(output)),
        _ => return Err("usage: convert <input.png|input.qoi> <output.png|output.qoi>".into()),
    };

    let is_qoif = |path: &Path| path.extension().map_or(false, |extension| extension == "qoi" || extension == "qoif");

    // decode straight into the `image` crate's buffer, so both directions share one pixel storage
    let rgba: png::RgbaImage = if is_qoif(input) {
        let file = std::io::BufReader::new(std::fs::File::open(input)?);
        decode_image_with(file, ReadOptions::default())?
    }
    else {
        png::open(input)?.to_rgba8()
    };

    if is_qoif(output) {
        let file = std::fs::File::create(output)?;
        encode_image(file, &rgba)?;
    }
    else {
        rgba.save(output)?;
    }

    println!("converted {} to {}", input.display(), output.display());
    Ok(())
}
