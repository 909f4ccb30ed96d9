//! # 输入与输出模型
//!
//! ## 设计思路
//!
//! 将“外部请求”和“解码结果”解耦：
//! - `ImageRequest` 表示调用方给出的文件路径
//! - `DecodedImage` 表示已按行对齐、所有权完全交给调用方的像素数据
//! - `ImageSummary` 是可序列化的元数据快照，用于日志与命令行输出

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::layout::RowLayout;

/// 加载请求：单个 PNG 文件路径。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    path: PathBuf,
}

impl ImageRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl From<&str> for ImageRequest {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ImageRequest {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for ImageRequest {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for ImageRequest {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

/// 解码结果。
///
/// 像素按行优先排列，每行补齐到 4 字节，尾部附带固定冗余区。
/// 通道顺序与解码库输出一致（R,G,B[,A]），不做重排。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    has_alpha: bool,
    layout: RowLayout,
}

impl DecodedImage {
    pub(crate) fn new(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        has_alpha: bool,
        layout: RowLayout,
    ) -> Self {
        Self {
            pixels,
            width,
            height,
            has_alpha,
            layout,
        }
    }

    /// 图像宽度（像素）。
    pub fn width(&self) -> u32 {
        self.width
    }

    /// 图像高度（像素）。
    pub fn height(&self) -> u32 {
        self.height
    }

    /// 颜色类型为 RGBA 时为 `true`，RGB 时为 `false`。
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// 解码库报告的每行有效字节数。
    pub fn row_bytes(&self) -> usize {
        self.layout.row_bytes
    }

    /// 对齐后的行跨度。
    pub fn stride(&self) -> usize {
        self.layout.stride
    }

    /// 完整缓冲区，含行尾填充与尾部冗余。
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// 第 `index` 行的有效像素字节（不含填充）。
    pub fn row(&self, index: usize) -> Option<&[u8]> {
        if index >= self.layout.height {
            return None;
        }
        let start = self.layout.row_offset(index);
        self.pixels.get(start..start + self.layout.row_bytes)
    }

    /// 交出像素缓冲区所有权。
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn summary(&self, path: &Path) -> ImageSummary {
        ImageSummary {
            path: path.display().to_string(),
            width: self.width,
            height: self.height,
            has_alpha: self.has_alpha,
            row_bytes: self.layout.row_bytes,
            stride: self.layout.stride,
            buffer_len: self.pixels.len(),
        }
    }
}

/// 解码结果的元数据快照。
#[derive(Debug, Clone, Serialize)]
pub struct ImageSummary {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
    pub row_bytes: usize,
    pub stride: usize,
    pub buffer_len: usize,
}
