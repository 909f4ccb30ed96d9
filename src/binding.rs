//! # 宿主命名空间绑定层
//!
//! ## 设计思路
//!
//! 绑定层仅做“宿主参数 → 核心调用 → 宿主返回值”的适配，不承载加载逻辑。
//! 模块初始化时向命名空间注册唯一入口 `load`，返回值与历史约定一致：
//! `(pixels: bytes, width: number, height: number, has_alpha: boolean)`。
//!
//! 具体嵌入哪种脚本运行时由上层决定，这里只给出与运行时无关的值模型与调用表。

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::HostError;
use crate::image_loader;

/// 向宿主暴露的命名空间名称。
pub const MODULE_NAME: &str = "pngloader";

/// 宿主侧可见的值。
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Boolean(bool),
    Number(f64),
    String(String),
    /// 不透明字节串，克隆开销为常数。
    Bytes(Bytes),
}

impl HostValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
        }
    }
}

/// 注册到命名空间的函数签名。
pub type HostFunction = fn(&[HostValue]) -> Result<Vec<HostValue>, HostError>;

/// 可调用命名空间。
#[derive(Debug, Clone)]
pub struct Namespace {
    name: String,
    functions: BTreeMap<&'static str, HostFunction>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn register(&mut self, name: &'static str, function: HostFunction) -> &mut Self {
        self.functions.insert(name, function);
        self
    }

    /// 已注册的函数名（按字典序）。
    pub fn function_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    pub fn call(&self, name: &str, args: &[HostValue]) -> Result<Vec<HostValue>, HostError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| HostError::UnknownFunction {
                namespace: self.name.clone(),
                name: name.to_string(),
            })?;

        function(args)
    }
}

/// 模块初始化入口：构建仅含 `load` 的命名空间。
pub fn open_module() -> Namespace {
    let mut namespace = Namespace::new(MODULE_NAME);
    namespace.register("load", host_load);
    log::debug!("⚙️ 已注册宿主命名空间: {}", MODULE_NAME);
    namespace
}

fn host_load(args: &[HostValue]) -> Result<Vec<HostValue>, HostError> {
    let path = match args.first() {
        Some(HostValue::String(path)) => path,
        other => {
            return Err(HostError::BadArgument {
                function: "load",
                position: 1,
                expected: "string",
                got: other.map_or("no value", HostValue::type_name),
            });
        }
    };

    let image = image_loader::load(path.as_str())?;
    let width = f64::from(image.width());
    let height = f64::from(image.height());
    let has_alpha = image.has_alpha();

    Ok(vec![
        HostValue::Bytes(Bytes::from(image.into_pixels())),
        HostValue::Number(width),
        HostValue::Number(height),
        HostValue::Boolean(has_alpha),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_exposes_only_load() {
        let namespace = open_module();

        assert_eq!(namespace.name(), MODULE_NAME);
        assert_eq!(namespace.function_names().collect::<Vec<_>>(), vec!["load"]);
    }

    #[test]
    fn load_requires_string_argument() {
        let namespace = open_module();

        let missing = namespace.call("load", &[]).unwrap_err();
        let number = namespace.call("load", &[HostValue::Number(1.0)]).unwrap_err();

        assert_eq!(
            missing.to_string(),
            "bad argument #1 to 'load' (string expected, got no value)"
        );
        assert_eq!(
            number.to_string(),
            "bad argument #1 to 'load' (string expected, got number)"
        );
    }

    #[test]
    fn unknown_function_is_rejected() {
        let err = open_module().call("save", &[]).unwrap_err();

        assert!(matches!(err, HostError::UnknownFunction { .. }));
        assert_eq!(err.to_string(), "attempt to call unknown function 'pngloader.save'");
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let err = open_module()
            .call(
                "load",
                &[HostValue::String("/definitely/not/here.png".to_string())],
            )
            .unwrap_err();

        assert_eq!(err.code(), "IOError");
        assert!(err.to_string().starts_with("can't open /definitely/not/here.png"));
    }
}
