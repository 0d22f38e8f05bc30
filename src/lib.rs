//! # bmp_stego 库
//!
//! 本库包含 BMP LSB 隐写编解码器的核心逻辑：
//! 位级打包/解包、帧编排、容量估算以及命令处理。

// 声明库包含的所有模块。

pub mod bmp;
pub mod cli;
pub mod constants;
pub mod error;
pub mod frame;
pub mod handler;
pub mod steganography;
