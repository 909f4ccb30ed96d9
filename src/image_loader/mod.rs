//! # PNG 加载模块（image_loader）
//!
//! ## 设计思路
//!
//! 将“打开文件 → 签名校验 → 交给解码库 → 行对齐写入 → 交出缓冲区”按职责拆分：
//!
//! - `loader`：加载主流程、解码库错误收口与资源释放顺序
//! - `layout`：行字节对齐与行偏移计算
//! - `config/error/source`：配置、错误、输入输出模型
//!
//! ## 调用链
//!
//! ```text
//! load(path)
//!    ↓
//! File::open ─→ 签名校验（infer 识别非 PNG 类型）
//!    ↓
//! png::Decoder::read_info ─→ 位深 / 颜色类型校验
//!    ↓
//! RowLayout（4 字节对齐）─→ 像素缓冲区 + 行偏移表
//!    ↓
//! 逐行解码写入 ─→ 释放解码器与文件 ─→ DecodedImage
//! ```

mod config;
mod error;
mod layout;
mod loader;
mod source;

pub use config::{DEFAULT_MEMORY_LIMIT, DEFAULT_SLACK_BYTES, LoaderConfig};
pub use error::{BufferKind, DecodeStage, ErrorKind, LoadError};
pub use layout::{ROW_ALIGNMENT, RowLayout, align_row_bytes};
pub use loader::{ImageLoader, PNG_SIGNATURE, load};
pub use source::{DecodedImage, ImageRequest, ImageSummary};
