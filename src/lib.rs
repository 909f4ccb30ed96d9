//! # PNG 纹理加载器 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  宿主脚本环境                              │
//! │        pngloader.load(path) → pixels, w, h, alpha        │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ Result<Vec<HostValue>, HostError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            Rust                                  │
//! │                                                          │
//! │  ┌─ binding ──── Namespace（唯一入口 `load`）             │
//! │  ├─ error ────── HostError（序列化为字符串）              │
//! │  └─ image_loader                                         │
//! │      ├─ loader   签名校验 · png 解码 · 资源释放顺序      │
//! │      ├─ layout   4 字节行对齐 · 行偏移                    │
//! │      └─ config / error / source                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`image_loader`] | 读取 8 位 RGB/RGBA PNG，输出行对齐像素缓冲区 |
//! | [`binding`] | 宿主命名空间适配，注册 `load` |
//! | [`error`] | 绑定层统一错误类型 `HostError` |

pub mod binding;
pub mod error;
pub mod image_loader;

pub use error::HostError;
pub use image_loader::{
    DecodedImage, ErrorKind, ImageLoader, ImageRequest, ImageSummary, LoadError, LoaderConfig,
    load,
};
