#[macro_use]
extern crate bencher;

extern crate qoif;
use qoif::prelude::*;

use bencher::Bencher;

/// A 512×512 image with smooth gradients, flat areas and a few hard edges.
fn photo_like() -> Image {
    Image::from_fn((512, 512), |Vec2(x, y)| {
        if (x / 64 + y / 64) % 5 == 0 { Pixel::rgb(240, 240, 230) }
        else { Pixel::rgba((x / 2) as u8, (y / 2) as u8, ((x ^ y) / 8) as u8, 255 - (y / 8) as u8) }
    })
}

fn noise() -> Image {
    let mut state = 0x2545_f491_u32;

    let pixels = (0 .. 512 * 512).map(|_| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        Pixel::from(state.to_be_bytes())
    });

    Image::new((512, 512), pixels.collect()).unwrap()
}

fn encode(image: &Image) -> Vec<u8> {
    let mut bytes = Vec::new();
    encode_image(&mut bytes, image).unwrap();
    bytes
}

fn encode_photo_like(bench: &mut Bencher) {
    let image = photo_like();
    bench.iter(|| bencher::black_box(encode(&image)));
}

fn encode_noise(bench: &mut Bencher) {
    let image = noise();
    bench.iter(|| bencher::black_box(encode(&image)));
}

fn decode_photo_like(bench: &mut Bencher) {
    let bytes = encode(&photo_like());
    bench.bytes = bytes.len() as u64;

    bench.iter(||{
        let image = decode_image(bytes.as_slice()).unwrap();
        bencher::black_box(image);
    })
}

fn decode_noise(bench: &mut Bencher) {
    let bytes = encode(&noise());
    bench.bytes = bytes.len() as u64;

    bench.iter(||{
        let image = decode_image(bytes.as_slice()).unwrap();
        bencher::black_box(image);
    })
}

/// Decode without allocating an image.
fn decode_photo_like_pixels_only(bench: &mut Bencher) {
    let bytes = encode(&photo_like());

    bench.iter(||{
        let decoder = Decoder::read_header(bytes.as_slice()).unwrap();
        let last = decoder.fold(Pixel::OPAQUE_BLACK, |_, pixel| pixel.unwrap());
        bencher::black_box(last);
    })
}

benchmark_group!(codec,
    encode_photo_like,
    encode_noise,
    decode_photo_like,
    decode_noise,
    decode_photo_like_pixels_only
);

benchmark_main!(codec);
