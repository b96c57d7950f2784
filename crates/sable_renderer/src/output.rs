//! Writing finished images to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::{OutputError, OutputResult};

/// Write an image as plain-text PPM (`P3`), top row first.
pub fn write_ppm<W: Write>(image: &RgbImage, mut writer: W) -> OutputResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for pixel in image.pixels() {
        let [r, g, b] = pixel.0;
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save an image, picking the format from the file extension.
///
/// `.ppm` is written as plain-text PPM; any other extension the `image`
/// crate recognizes is passed through to its encoder.
pub fn save(image: &RgbImage, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if extension == "ppm" {
        let file = File::create(path)?;
        write_ppm(image, BufWriter::new(file))?;
    } else {
        let format = ImageFormat::from_extension(&extension)
            .ok_or_else(|| OutputError::UnsupportedFormat(path.display().to_string()))?;
        image.save_with_format(path, format)?;
    }

    log::info!("Saved {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_write_ppm() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([255, 0, 10]));
        image.put_pixel(1, 0, Rgb([1, 2, 3]));

        let mut out = Vec::new();
        write_ppm(&image, &mut out).expect("write to memory");

        let text = String::from_utf8(out).expect("ascii");
        assert_eq!(text, "P3\n2 1\n255\n255 0 10\n1 2 3\n");
    }

    #[test]
    fn test_save_png_round_trip() {
        let mut image = RgbImage::new(3, 2);
        image.put_pixel(2, 1, Rgb([9, 99, 199]));

        let path = std::env::temp_dir().join(format!("sable_output_{}.png", std::process::id()));
        save(&image, &path).expect("save png");

        let loaded = image::open(&path).expect("reload").to_rgb8();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let image = RgbImage::new(1, 1);
        let path = std::env::temp_dir().join("sable_output.notaformat");

        assert!(matches!(
            save(&image, &path),
            Err(OutputError::UnsupportedFormat(_))
        ));
    }
}
