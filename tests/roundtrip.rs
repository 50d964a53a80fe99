extern crate qoif;
extern crate rand;
extern crate rayon;

use qoif::prelude::*;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};


#[derive(Debug, Clone, Copy)]
enum Content { Noise, Palette, Gradient, Alpha, Flat, Stripes }

impl Content {
    const ALL: [Content; 6] = [
        Content::Noise, Content::Palette, Content::Gradient,
        Content::Alpha, Content::Flat, Content::Stripes,
    ];

    fn generate(self, size: Vec2<usize>, random: &mut StdRng) -> Image {
        let palette: Vec<Pixel> = (0 .. 5).map(|_| Pixel::from(random.random::<[u8; 4]>())).collect();
        let base: [u8; 4] = random.random();

        let pixels = size.positions_row_major().map(|Vec2(x, y)| match self {
            Content::Noise => Pixel::from(random.random::<[u8; 4]>()),
            Content::Palette => palette[random.random_range(0 .. palette.len())],

            Content::Gradient => Pixel::rgb(
                base[0].wrapping_add(x as u8),
                base[1].wrapping_add(y as u8),
                base[2].wrapping_add((x + y) as u8 / 2),
            ),

            Content::Alpha => Pixel::rgba(
                base[0].wrapping_add(random.random_range(0 .. 3)),
                base[1], base[2],
                (x * 255 / size.width().max(1)) as u8,
            ),

            Content::Flat => {
                if random.random_range(0 .. 5000) == 0 { Pixel::from(base) }
                else { Pixel::OPAQUE_BLACK }
            },

            Content::Stripes => palette[(y / 3 + x / 40) % palette.len()],
        });

        Image::new(size, pixels.collect()).unwrap()
    }
}

fn check_round_trip(image: &Image) {
    let mut bytes = Vec::new();
    encode_image(&mut bytes, image).unwrap();

    let header = decode_header(bytes.as_slice()).unwrap();
    assert_eq!(header.size().unwrap(), image.size);

    let decoded = decode_image(bytes.as_slice()).unwrap();
    assert_eq!(&decoded, image);
}

#[test]
fn round_trip_generated_images(){
    let sizes: &[(usize, usize)] = &[
        (0, 0), (1, 0), (0, 7), (1, 1), (2, 1), (1, 40),
        (31, 17), (64, 64), (257, 3), (300, 200), (9000, 2),
    ];

    let cases: Vec<(usize, Content, (usize, usize))> = (0 .. 4)
        .flat_map(|seed| Content::ALL.into_iter().flat_map(move |content| {
            sizes.iter().map(move |&size| (seed, content, size))
        }))
        .collect();

    cases.into_par_iter().for_each(|(seed, content, size)| {
        let mut random = StdRng::seed_from_u64(seed as u64 * 7919 + size.0 as u64);
        let image = content.generate(Vec2::from(size), &mut random);
        check_round_trip(&image);
    });
}

#[test]
fn round_trip_with_options(){
    let mut random = StdRng::seed_from_u64(13);
    let image = Content::Noise.generate(Vec2(40, 30), &mut random);

    for options in [WriteOptions::default(), WriteOptions::rgb(), WriteOptions::rgb().with_colorspace(1)] {
        let mut bytes = Vec::new();
        encode_image_with(&mut bytes, options, &image).unwrap();

        let header = decode_header(bytes.as_slice()).unwrap();
        assert_eq!(header.channels, options.channels);
        assert_eq!(header.colorspace, options.colorspace);

        // channels and colorspace never change the decoded pixels
        let decoded: Image = decode_image_with(bytes.as_slice(), ReadOptions::default()).unwrap();
        assert_eq!(decoded, image);
    }
}

#[test]
fn small_steps_compress(){
    let image = Image::from_fn((256, 64), |Vec2(x, y)| Pixel::rgb(x as u8, (y * 2) as u8, 90));

    let mut bytes = Vec::new();
    encode_image(&mut bytes, &image).unwrap();

    // every pixel is a one-byte step from its neighbour, except at row starts
    assert!(bytes.len() < 256 * 64 + 64 * 4 + 18, "{} bytes", bytes.len());
    assert_eq!(decode_image(bytes.as_slice()).unwrap(), image);
}

#[test]
fn stream_by_hand(){
    let mut random = StdRng::seed_from_u64(99);
    let pixels: Vec<Pixel> = (0 .. 5000)
        .map(|index| if index % 100 < 50 { Pixel::rgb(7, 7, 7) } else { Pixel::from(random.random::<[u8; 4]>()) })
        .collect();

    let header = Header::new((100, 50)).unwrap();
    let mut bytes = Vec::new();
    header.write(&mut bytes).unwrap();

    let mut encoder = Encoder::new(&mut bytes);
    encoder.push_all(pixels.iter().copied()).unwrap();
    assert_eq!(encoder.pixel_count(), pixels.len());
    encoder.finish().unwrap();

    let decoder = Decoder::read_header(bytes.as_slice()).unwrap();
    assert_eq!(decoder.header(), &header);
    assert_eq!(decoder.remaining(), pixels.len());

    let decoded: Result<Vec<Pixel>> = decoder.collect();
    assert_eq!(decoded.unwrap(), pixels);
}

#[test]
fn round_trip_file(){
    let mut random = StdRng::seed_from_u64(5);
    let image = Content::Stripes.generate(Vec2(120, 80), &mut random);

    let path = std::env::temp_dir().join("qoif-round-trip-test.qoi");
    write_image_to_file(&path, &image).unwrap();

    let decoded = read_image_from_file(&path);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(decoded.unwrap(), image);
}
