
//! Encode and decode the RGBA images of the `image` crate,
//! for example to convert between png and qoif.

use piston_image::{Rgba, RgbaImage};

use super::*;


impl From<Rgba<u8>> for Pixel {
    fn from(Rgba([red, green, blue, alpha]): Rgba<u8>) -> Self {
        Pixel { red, green, blue, alpha }
    }
}

impl From<Pixel> for Rgba<u8> {
    fn from(pixel: Pixel) -> Self {
        Rgba(pixel.into())
    }
}

impl GetPixel for RgbaImage {
    fn size(&self) -> Vec2<usize> {
        let (width, height) = self.dimensions();
        Vec2(width as usize, height as usize)
    }

    #[inline]
    fn get_pixel(&self, Vec2(x, y): Vec2<usize>) -> Pixel {
        // positions are inside the u32 dimensions of the image
        Pixel::from(*RgbaImage::get_pixel(self, x as u32, y as u32))
    }
}

impl SetPixel for RgbaImage {
    fn create(header: &Header) -> Result<Self> {
        header.pixel_count()?;
        Ok(RgbaImage::new(header.width, header.height))
    }

    #[inline]
    fn set_pixel(&mut self, Vec2(x, y): Vec2<usize>, pixel: Pixel) {
        self.put_pixel(x as u32, y as u32, pixel.into());
    }
}

impl From<&RgbaImage> for Image {
    fn from(rgba: &RgbaImage) -> Self {
        Image::from_fn(GetPixel::size(rgba), |position| GetPixel::get_pixel(rgba, position))
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn png_round_trip(){
        let rgba = RgbaImage::from_fn(17, 9, |x, y| Rgba([x as u8 * 15, y as u8 * 28, 77, 255 - x as u8]));

        let mut png = Vec::new();
        rgba.write_to(&mut std::io::Cursor::new(&mut png), piston_image::ImageFormat::Png).unwrap();
        let from_png = piston_image::load_from_memory(&png).unwrap().to_rgba8();

        let mut qoif = Vec::new();
        encode_image(&mut qoif, &from_png).unwrap();
        let decoded: RgbaImage = decode_image_with(qoif.as_slice(), ReadOptions::default()).unwrap();

        assert_eq!(decoded, rgba);
        assert_eq!(Image::from(&decoded), decode_image(qoif.as_slice()).unwrap());
    }
}
