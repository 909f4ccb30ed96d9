//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载加载链路中的所有失败来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按 `ErrorKind` 分类匹配。
//!
//! 错误文案保持英文，与宿主脚本历来看到的消息一致（`can't open` / `is not a PNG` 等）。

use std::fmt;
use std::path::PathBuf;

/// 对外可见的错误分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 文件无法打开或读取。
    Io,
    /// 文件头不是 PNG 签名。
    Format,
    /// 解码库内部报告失败（初始化或读取阶段）。
    Decode,
    /// 合法 PNG，但位深或颜色类型不受支持。
    UnsupportedFormat,
    /// 缓冲区分配失败。
    Allocation,
}

/// 解码库失败时所处的阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// 解码器无法建立内部状态。
    Init,
    /// 读取 IHDR 等块头信息。
    Header,
    /// 读取扫描行。
    Scanlines,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("cannot initialize decoder"),
            Self::Header => f.write_str("decode failure during header read"),
            Self::Scanlines => f.write_str("decode failure during scanline read"),
        }
    }
}

/// 分配失败的目标缓冲区。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    PixelData,
    RowOffsets,
    InterlaceScratch,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PixelData => f.write_str("image data"),
            Self::RowOffsets => f.write_str("row offsets"),
            Self::InterlaceScratch => f.write_str("interlaced frame"),
        }
    }
}

/// 图片加载统一错误类型。
///
/// 每个分支都携带文件路径；格式类错误额外携带触发错误的数值。
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("can't open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a PNG{}", path.display(), detected_suffix(*detected))]
    NotPng {
        path: PathBuf,
        detected: Option<&'static str>,
    },

    #[error("error from PNG decoder while loading {}: {stage}: {message}", path.display())]
    Decode {
        path: PathBuf,
        stage: DecodeStage,
        message: String,
    },

    #[error("{}: unsupported bit depth {bit_depth}, must be 8", path.display())]
    UnsupportedBitDepth { path: PathBuf, bit_depth: u8 },

    #[error("{}: unknown color type {color_type}, must be RGB (2) or RGBA (6)", path.display())]
    UnsupportedColorType { path: PathBuf, color_type: u8 },

    #[error("{}: could not allocate {requested} bytes for {buffer}", path.display())]
    Allocation {
        path: PathBuf,
        buffer: BufferKind,
        requested: usize,
    },
}

fn detected_suffix(detected: Option<&'static str>) -> String {
    detected
        .map(|mime| format!(" (detected {mime})"))
        .unwrap_or_default()
}

impl LoadError {
    /// 错误所属分类。
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::NotPng { .. } => ErrorKind::Format,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::UnsupportedBitDepth { .. } | Self::UnsupportedColorType { .. } => {
                ErrorKind::UnsupportedFormat
            }
            Self::Allocation { .. } => ErrorKind::Allocation,
        }
    }

    /// 稳定的错误码，供宿主按字符串匹配。
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Io => "IOError",
            ErrorKind::Format => "FormatError",
            ErrorKind::Decode => "DecodeError",
            ErrorKind::UnsupportedFormat => "UnsupportedFormatError",
            ErrorKind::Allocation => "AllocationError",
        }
    }

    /// 出错的文件路径。
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::NotPng { path, .. }
            | Self::Decode { path, .. }
            | Self::UnsupportedBitDepth { path, .. }
            | Self::UnsupportedColorType { path, .. }
            | Self::Allocation { path, .. } => path,
        }
    }

    /// 将解码库错误映射为 `Decode`。
    ///
    /// 解码器因内存上限拒绝建立内部状态时归入 `Init` 阶段。
    pub(crate) fn from_decoder(
        path: PathBuf,
        stage: DecodeStage,
        error: png::DecodingError,
    ) -> Self {
        let stage = match (&error, stage) {
            (png::DecodingError::LimitsExceeded, DecodeStage::Header) => DecodeStage::Init,
            _ => stage,
        };

        Self::Decode {
            path,
            stage,
            message: error.to_string(),
        }
    }
}
