//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在 24 位 BMP 图像中隐藏或恢复任意文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在 24 位 BMP 图像中隐藏或恢复任意文件。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏) 和 recover (恢复)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在 24 位 BMP 图像中隐藏一个秘密文件。
    Hide(HideArgs),

    /// 从经过隐写的 BMP 图像中恢复隐藏的文件。
    Recover(RecoverArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用作载体的 24 位 BMP 图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的秘密文件路径，扩展名会一并嵌入以便恢复时还原。
    #[arg(short, long)]
    pub secret: PathBuf,

    /// 隐写完成后，保存结果图像的输出路径。
    #[arg(short, long, default_value = "output_image.bmp")]
    pub dest: PathBuf,

    /// 用作帧标记的 magic 字符串，恢复时必须提供同一个。
    #[arg(short, long)]
    pub marker: String,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏秘密文件的 BMP 图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复出的文件的保存路径 (不带扩展名，恢复出的扩展名会自动附加)。
    #[arg(short, long, default_value = "output_text")]
    pub output: PathBuf,

    /// 隐藏时使用的 magic 字符串。
    #[arg(short, long)]
    pub marker: String,
}
