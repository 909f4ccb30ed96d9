//! # 配置模块
//!
//! ## 设计思路
//!
//! 加载链路本身几乎没有可调项，仅把两个常量集中到 `LoaderConfig`：
//! 缓冲区尾部冗余字节数，以及单次加载的内存上限。
//! 内存上限同时约束解码库内部分配与输出像素缓冲区，后者在分配前按 IHDR 尺寸预估。
//! 行对齐固定为 4 字节，不开放配置（下游纹理上传依赖该约定）。

/// 旧调用方假定缓冲区尾部存在的额外字节数，内容无定义。
pub const DEFAULT_SLACK_BYTES: usize = 15;

/// 单次加载的默认内存上限（字节）。
pub const DEFAULT_MEMORY_LIMIT: usize = 1024 * 1024 * 1024;

/// 图片加载配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// 输出缓冲区尾部附加的冗余字节数。
    pub slack_bytes: usize,
    /// 内存上限：解码库内部分配与输出缓冲区（含冗余）各自不得超过该值。
    pub memory_limit: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            slack_bytes: DEFAULT_SLACK_BYTES,
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}

impl LoaderConfig {
    /// 转换为解码库的限制参数。
    pub(crate) fn decoder_limits(&self) -> png::Limits {
        let mut limits = png::Limits::default();
        limits.bytes = self.memory_limit;
        limits
    }
}
