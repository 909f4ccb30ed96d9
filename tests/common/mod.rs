// Fixture writers shared by the integration tests.
#![allow(dead_code)]

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes a PNG with the given raw parameters using the png encoder directly.
pub fn write_png(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    data: &[u8],
) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("create fixture failed");
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color);
    encoder.set_depth(depth);
    if color == png::ColorType::Indexed {
        encoder.set_palette(vec![0, 0, 0, 255, 255, 255]);
    }
    encoder
        .write_header()
        .expect("write header failed")
        .write_image_data(data)
        .expect("write image data failed");
    path
}

/// Solid-color RGB image saved through the image crate.
pub fn write_solid_rgb(dir: &Path, name: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(width, height, image::Rgb(rgb))
        .save(&path)
        .expect("save rgb fixture failed");
    path
}

/// RGBA gradient whose pixel at (x, y) is (x, y, x + y, 255 - x).
pub fn write_rgba_gradient(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([x as u8, y as u8, (x + y) as u8, 255 - x as u8])
    })
    .save(&path)
    .expect("save rgba fixture failed");
    path
}

/// Adam7 passes as (x0, y0, dx, dy).
const ADAM7_PASSES: [(usize, usize, usize, usize); 7] = [
    (0, 0, 8, 8),
    (4, 0, 8, 8),
    (0, 4, 4, 8),
    (2, 0, 4, 4),
    (0, 2, 2, 4),
    (1, 0, 2, 2),
    (0, 1, 1, 2),
];

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in bytes {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
        }
    }
    !crc
}

fn adler32(bytes: &[u8]) -> u32 {
    let (mut a, mut b) = (1u32, 0u32);
    for &byte in bytes {
        a = (a + u32::from(byte)) % 65_521;
        b = (b + a) % 65_521;
    }
    (b << 16) | a
}

/// Appends one chunk (length, type, data, CRC) to `out`.
pub fn push_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    let start = out.len();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let crc = crc32(&out[start..]);
    out.extend_from_slice(&crc.to_be_bytes());
}

/// Wraps `data` in a zlib stream made of uncompressed deflate blocks.
pub fn zlib_stored(data: &[u8]) -> Vec<u8> {
    let mut out = vec![0x78, 0x01];
    let blocks: Vec<&[u8]> = if data.is_empty() {
        vec![&[]]
    } else {
        data.chunks(usize::from(u16::MAX)).collect()
    };
    let last = blocks.len() - 1;
    for (index, block) in blocks.into_iter().enumerate() {
        out.push(u8::from(index == last));
        let len = block.len() as u16;
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&(!len).to_le_bytes());
        out.extend_from_slice(block);
    }
    out.extend_from_slice(&adler32(data).to_be_bytes());
    out
}

/// Signature, IHDR (8-bit), one IDAT carrying `idat` verbatim, IEND.
pub fn assemble_png(
    width: u32,
    height: u32,
    color_type: u8,
    interlace: u8,
    idat: &[u8],
) -> Vec<u8> {
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, color_type, 0, 0, interlace]);

    let mut out = vec![137, 80, 78, 71, 13, 10, 26, 10];
    push_chunk(&mut out, b"IHDR", &ihdr);
    push_chunk(&mut out, b"IDAT", idat);
    push_chunk(&mut out, b"IEND", &[]);
    out
}

/// Unfiltered 8-bit RGB scanlines laid out in Adam7 pass order.
pub fn adam7_rgb_scanlines(
    width: usize,
    height: usize,
    pixel: impl Fn(usize, usize) -> [u8; 3],
) -> Vec<u8> {
    let mut out = Vec::new();
    for (x0, y0, dx, dy) in ADAM7_PASSES {
        if x0 >= width || y0 >= height {
            continue;
        }
        for y in (y0..height).step_by(dy) {
            out.push(0);
            for x in (x0..width).step_by(dx) {
                out.extend_from_slice(&pixel(x, y));
            }
        }
    }
    out
}

/// Interlaced RGB image; `keep` cuts the compressed stream to that many bytes.
pub fn write_interlaced_rgb(
    dir: &Path,
    name: &str,
    width: usize,
    height: usize,
    pixel: impl Fn(usize, usize) -> [u8; 3],
    keep: Option<usize>,
) -> PathBuf {
    let mut idat = zlib_stored(&adam7_rgb_scanlines(width, height, pixel));
    if let Some(keep) = keep {
        idat.truncate(keep);
    }
    let bytes = assemble_png(width as u32, height as u32, 2, 1, &idat);

    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write interlaced fixture failed");
    path
}

/// Header-only RGBA image claiming `width` x `height`, with a token IDAT.
pub fn write_oversized_header(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let idat = [0x78, 0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00];
    let bytes = assemble_png(width, height, 6, 0, &idat);

    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write oversized fixture failed");
    path
}
