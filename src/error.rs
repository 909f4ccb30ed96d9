//! 宿主层统一错误类型模块
//!
//! # 设计思路
//!
//! 宿主脚本环境只认识“抛出的错误字符串”。`HostError` 汇总绑定层自身的参数错误
//! 与核心加载错误，对外统一序列化为人类可读字符串。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生错误消息。
//! - 为 `LoadError` 提供 `From` 转换，绑定函数内直接 `?`。
//! - 实现 `Serialize`，宿主侧拿到的就是 `Display` 文本。

use serde::Serialize;

use crate::image_loader::LoadError;

/// 绑定层错误。
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// 宿主传入的参数类型不符。
    #[error("bad argument #{position} to '{function}' ({expected} expected, got {got})")]
    BadArgument {
        function: &'static str,
        position: usize,
        expected: &'static str,
        got: &'static str,
    },

    /// 图片加载失败。
    #[error("{0}")]
    Load(#[from] LoadError),

    /// 命名空间中不存在该函数。
    #[error("attempt to call unknown function '{namespace}.{name}'")]
    UnknownFunction { namespace: String, name: String },
}

impl HostError {
    /// 稳定错误码：加载错误沿用核心分类，其余为绑定层自有。
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadArgument { .. } => "ArgumentError",
            Self::Load(err) => err.code(),
            Self::UnknownFunction { .. } => "UnknownFunction",
        }
    }
}

impl Serialize for HostError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
