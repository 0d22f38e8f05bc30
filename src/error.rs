//! # 错误类型模块
//!
//! 定义编码/解码管线中所有可能出现的错误种类。
//! 核心操作一律返回 [`Result`]，错误立即向上层传播并中止剩余步骤，
//! 错误信息的呈现方式由调用方决定。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 本库操作统一使用的 Result 别名。
pub type Result<T> = std::result::Result<T, Error>;

/// 编码/解码过程中可能出现的错误。
#[derive(Error, Debug)]
pub enum Error {
    /// 参数不合法 (空 magic 字符串、文件类型错误、秘密文件过大等)。
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// 无法打开或创建指定路径的文件。
    #[error("Unable to open file: {}", .path.display())]
    UnopenableFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 载体图像的容量不足以容纳秘密文件和帧开销。
    #[error("Not enough capacity in the carrier image: need {required} bytes, have {available} bytes")]
    InsufficientCapacity { required: u64, available: u64 },

    /// 解码时未能在图像中找到期望的 magic 标记。
    #[error("Marker not found: the image does not carry data framed with the expected marker")]
    MarkerMismatch,

    /// 帧尚未读写完毕，载体字节流就提前结束了。
    #[error("Unexpected end of carrier data while {phase}")]
    UnexpectedEndOfCarrier { phase: &'static str },

    /// 其余的读写故障。
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
