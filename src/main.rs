//! # PNG 纹理加载器 — 命令行入口
//!
//! 逐个加载命令行给出的 PNG 文件，每个文件输出一行 JSON 摘要。
//! 任一文件失败时退出码为 1。

use std::env;
use std::path::Path;
use std::process::ExitCode;

use png_texture_loader::ImageLoader;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: png-texture-loader <file.png>...");
        return ExitCode::from(2);
    }

    let loader = ImageLoader::default();
    let mut failed = 0usize;

    for path in &paths {
        match loader.load(path.as_str()) {
            Ok(image) => match serde_json::to_string(&image.summary(Path::new(path))) {
                Ok(line) => println!("{line}"),
                Err(err) => {
                    log::error!("序列化摘要失败: {err}");
                    failed += 1;
                }
            },
            Err(err) => {
                log::error!("[{}] {err}", err.code());
                failed += 1;
            }
        }
    }

    log::info!("完成: {} 个文件，失败 {} 个", paths.len(), failed);

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
