//! # 加载与解码模块
//!
//! ## 设计思路
//!
//! 加载流程严格线性，每一步失败都立即转为 `LoadError` 返回，不重试、不返回部分数据。
//! 解码器（`png::Reader`）持有文件句柄，二者同生共死；像素缓冲区在其后分配。
//! 失败路径上按“解码器 → 文件句柄 → 输出缓冲区”的顺序释放资源。
//!
//! ## 实现思路
//!
//! 1. 打开文件，读取 8 字节签名并比对，未通过前不创建任何解码器资源
//! 2. 将已读出的签名拼回流前，交给解码器解析到像素数据之前的所有块
//! 3. 校验位深（仅 8）与颜色类型（仅 RGB / RGBA）
//! 4. 按解码器报告的行字节数做 4 字节对齐，一次性分配整块缓冲区与行偏移表
//! 5. 逐行解码写入各自偏移；隔行扫描图像先解出紧凑帧再分散到各行
//!
//! 所有对解码库的调用都经过 `trap_decoder`，它是库内部故障的唯一收口点；
//! 本模块自身的校验直接内联返回错误。

use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use super::error::{BufferKind, DecodeStage};
use super::layout::RowLayout;
use super::{DecodedImage, ImageRequest, LoadError, LoaderConfig};

/// PNG 文件固定的 8 字节签名。
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// PNG 图片加载器。
///
/// 只持有不可变配置，可在多线程间共享；每次加载的文件句柄、
/// 解码器与输出缓冲区都归该次调用独占。
#[derive(Debug, Clone, Default)]
pub struct ImageLoader {
    config: LoaderConfig,
}

/// 块头校验通过后的图像元数据。
struct Header {
    width: u32,
    height: u32,
    has_alpha: bool,
}

impl ImageLoader {
    /// 根据配置创建加载器。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use png_texture_loader::{ImageLoader, LoaderConfig};
    ///
    /// let loader = ImageLoader::new(LoaderConfig::default());
    /// let image = loader.load("textures/brick.png")?;
    /// assert_eq!(image.stride() % 4, 0);
    /// # Ok::<(), png_texture_loader::LoadError>(())
    /// ```
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// 从磁盘加载 PNG。
    pub fn load(&self, request: impl Into<ImageRequest>) -> Result<DecodedImage, LoadError> {
        let request = request.into();
        let path = request.path();
        log::debug!("📁 开始读取 PNG - 路径: {}", path.display());

        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.load_from_reader(path, BufReader::new(file))
    }

    /// 从任意字节源加载 PNG，`path` 仅用于错误信息与日志。
    ///
    /// `source` 在函数返回前一定被释放，无论成功或失败。
    pub fn load_from_reader<R: Read>(
        &self,
        path: &Path,
        mut source: R,
    ) -> Result<DecodedImage, LoadError> {
        let signature = Self::read_signature(path, &mut source)?;

        // 签名已被读走，拼回流前让解码器从头解析
        let stream = Cursor::new(signature).chain(source);
        let mut decoder = png::Decoder::new_with_limits(stream, self.config.decoder_limits());
        decoder.set_transformations(png::Transformations::IDENTITY);

        let mut reader = trap_decoder(path, DecodeStage::Header, move || decoder.read_info())?;
        let header = Self::inspect_header(path, reader.info())?;

        let (output_color, output_depth) = reader.output_color_type();
        let row_bytes = reader.output_line_size(header.width);
        if row_bytes == 0 {
            return Err(LoadError::Decode {
                path: path.to_path_buf(),
                stage: DecodeStage::Header,
                message: "decoder reported zero-length rows".to_string(),
            });
        }

        let layout = RowLayout::new(row_bytes, header.height as usize);
        log::debug!(
            "🧩 PNG 头信息 - {}x{} 输出: {:?}/{:?} 行字节: {} 跨度: {}",
            header.width,
            header.height,
            output_color,
            output_depth,
            layout.row_bytes,
            layout.stride
        );

        let mut pixels = Self::allocate_pixels(path, &layout, &self.config)?;
        let offsets = match Self::allocate_row_offsets(path, &layout) {
            Ok(offsets) => offsets,
            Err(err) => {
                drop(reader);
                return Err(err);
            }
        };

        // 隔行图像的紧凑帧，在解码器之后释放
        let mut scratch = Vec::new();
        let outcome = Self::read_scanlines(
            path,
            &mut reader,
            &layout,
            &offsets,
            &mut pixels,
            &mut scratch,
        );
        // 先释放解码器与文件句柄，失败时缓冲区随后丢弃
        drop(reader);
        outcome?;

        log::debug!(
            "✅ PNG 解码成功 - 路径: {} 尺寸: {}x{} alpha: {}",
            path.display(),
            header.width,
            header.height,
            header.has_alpha
        );

        Ok(DecodedImage::new(
            pixels,
            header.width,
            header.height,
            header.has_alpha,
            layout,
        ))
    }

    /// 读取并校验 8 字节签名。
    fn read_signature<R: Read>(path: &Path, source: &mut R) -> Result<[u8; 8], LoadError> {
        let mut signature = [0u8; 8];
        let mut filled = 0;

        while filled < signature.len() {
            match source.read(&mut signature[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(LoadError::Io {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }

        if filled < signature.len() || signature != PNG_SIGNATURE {
            let detected = infer::get(&signature[..filled])
                .map(|kind| kind.mime_type())
                .filter(|mime| *mime != "image/png");

            return Err(LoadError::NotPng {
                path: path.to_path_buf(),
                detected,
            });
        }

        Ok(signature)
    }

    /// 校验位深与颜色类型，并推导 alpha 标志。
    fn inspect_header(path: &Path, info: &png::Info<'_>) -> Result<Header, LoadError> {
        if info.bit_depth != png::BitDepth::Eight {
            return Err(LoadError::UnsupportedBitDepth {
                path: path.to_path_buf(),
                bit_depth: info.bit_depth as u8,
            });
        }

        let has_alpha = match info.color_type {
            png::ColorType::Rgb => false,
            png::ColorType::Rgba => true,
            other => {
                return Err(LoadError::UnsupportedColorType {
                    path: path.to_path_buf(),
                    color_type: other as u8,
                });
            }
        };

        Ok(Header {
            width: info.width,
            height: info.height,
            has_alpha,
        })
    }

    /// 按 IHDR 尺寸分配输出缓冲区，超过内存上限时在分配前拒绝。
    fn allocate_pixels(
        path: &Path,
        layout: &RowLayout,
        config: &LoaderConfig,
    ) -> Result<Vec<u8>, LoadError> {
        let len = layout
            .buffer_len(config.slack_bytes)
            .ok_or_else(|| LoadError::Allocation {
                path: path.to_path_buf(),
                buffer: BufferKind::PixelData,
                requested: usize::MAX,
            })?;

        if len > config.memory_limit {
            return Err(LoadError::Allocation {
                path: path.to_path_buf(),
                buffer: BufferKind::PixelData,
                requested: len,
            });
        }

        let mut pixels = Vec::new();
        reserve_zeroed(path, BufferKind::PixelData, &mut pixels, len)?;
        Ok(pixels)
    }

    fn allocate_row_offsets(path: &Path, layout: &RowLayout) -> Result<Vec<usize>, LoadError> {
        let mut offsets = Vec::new();
        offsets
            .try_reserve_exact(layout.height)
            .map_err(|_| LoadError::Allocation {
                path: path.to_path_buf(),
                buffer: BufferKind::RowOffsets,
                requested: layout.height.saturating_mul(size_of::<usize>()),
            })?;
        offsets.extend(layout.row_offsets());
        Ok(offsets)
    }

    /// 将全部扫描行写入各自的行偏移处。
    fn read_scanlines<R: Read>(
        path: &Path,
        reader: &mut png::Reader<R>,
        layout: &RowLayout,
        offsets: &[usize],
        pixels: &mut [u8],
        scratch: &mut Vec<u8>,
    ) -> Result<(), LoadError> {
        if reader.info().interlaced {
            return Self::read_interlaced(path, reader, layout, offsets, pixels, scratch);
        }

        for (index, &offset) in offsets.iter().enumerate() {
            let dst = &mut pixels[offset..offset + layout.row_bytes];
            let received = trap_decoder(path, DecodeStage::Scanlines, || {
                let Some(row) = reader.next_row()? else {
                    return Ok(None);
                };
                let data = row.data();
                let len = data.len().min(dst.len());
                dst[..len].copy_from_slice(&data[..len]);
                Ok(Some(data.len()))
            })?;

            match received {
                Some(len) if len == layout.row_bytes => {}
                Some(len) => {
                    return Err(scanline_error(
                        path,
                        format!("row {index} has {len} bytes, expected {}", layout.row_bytes),
                    ));
                }
                None => {
                    return Err(scanline_error(
                        path,
                        format!("image data ended after {index} of {} rows", layout.height),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Adam7 隔行图像：由解码器输出紧凑帧，再逐行搬到对齐偏移。
    fn read_interlaced<R: Read>(
        path: &Path,
        reader: &mut png::Reader<R>,
        layout: &RowLayout,
        offsets: &[usize],
        pixels: &mut [u8],
        frame: &mut Vec<u8>,
    ) -> Result<(), LoadError> {
        let frame_len = reader.output_buffer_size();
        reserve_zeroed(path, BufferKind::InterlaceScratch, frame, frame_len)?;
        trap_decoder(path, DecodeStage::Scanlines, || reader.next_frame(&mut frame[..]))?;

        let rows = frame.chunks_exact(layout.row_bytes);
        if rows.len() < offsets.len() {
            return Err(scanline_error(
                path,
                format!(
                    "decoded frame holds {} of {} rows",
                    rows.len(),
                    layout.height
                ),
            ));
        }

        for (src, &offset) in rows.zip(offsets) {
            pixels[offset..offset + layout.row_bytes].copy_from_slice(src);
        }

        Ok(())
    }
}

/// 使用默认配置加载 PNG。
pub fn load(request: impl Into<ImageRequest>) -> Result<DecodedImage, LoadError> {
    ImageLoader::default().load(request)
}

/// 解码库调用的错误收口点。
///
/// 库返回的错误与库内部 panic 都转为 `LoadError::Decode`；
/// 调用方持有的资源由所有权在返回路径上释放。
fn trap_decoder<T>(
    path: &Path,
    stage: DecodeStage,
    call: impl FnOnce() -> Result<T, png::DecodingError>,
) -> Result<T, LoadError> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(LoadError::from_decoder(path.to_path_buf(), stage, err)),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|msg| (*msg).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "decoder panicked".to_string());

            Err(LoadError::Decode {
                path: path.to_path_buf(),
                stage,
                message,
            })
        }
    }
}

fn scanline_error(path: &Path, message: String) -> LoadError {
    LoadError::Decode {
        path: path.to_path_buf(),
        stage: DecodeStage::Scanlines,
        message,
    }
}

/// 在 `bytes` 中预留并清零 `len` 字节，分配失败转为 `Allocation`。
fn reserve_zeroed(
    path: &Path,
    buffer: BufferKind,
    bytes: &mut Vec<u8>,
    len: usize,
) -> Result<(), LoadError> {
    bytes
        .try_reserve_exact(len)
        .map_err(|_| LoadError::Allocation {
            path: path.to_path_buf(),
            buffer,
            requested: len,
        })?;
    bytes.resize(len, 0);
    Ok(())
}
