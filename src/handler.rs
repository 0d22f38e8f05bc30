//! # 命令处理逻辑模块
//!
//! 包含处理 `hide` 和 `recover` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用帧编排与位级隐写核心，
//! 并向用户报告结果；核心算法本身不在此模块中。

use crate::bmp;
use crate::cli::{HideArgs, RecoverArgs};
use crate::error::Error;
use crate::frame::{FrameReader, FrameWriter};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// 从秘密文件的文件名推导要嵌入帧中的扩展名。
///
/// 取最后一个 '.' 之后的部分并在前面补上 '.'；
/// 文件名没有扩展名时返回空字符串，恢复侧会跳过重命名。
pub fn secret_extension(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    }
}

fn is_bmp_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bmp"))
}

fn open_input(path: &Path) -> Result<File> {
    let file = File::open(path).map_err(|source| Error::UnopenableFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file)
}

fn create_output(path: &Path) -> Result<File> {
    let file = File::create(path).map_err(|source| Error::UnopenableFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file)
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责打开载体图像和秘密文件、在写出任何字节之前完成容量检查、
/// 调用帧写入器嵌入 magic 标记/扩展名/载荷，最后把载体剩余像素
/// 原样透传，得到与原图同尺寸的隐写图像。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * magic 字符串为空，或输入/输出路径不是 .bmp 文件。
/// * 无法打开载体图像或秘密文件，或无法创建输出文件。
/// * 载体容量不足以容纳秘密文件和帧开销 (在写出前检出)。
/// * 嵌入过程中载体字节提前耗尽或发生其他 I/O 故障。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    if args.marker.is_empty() {
        return Err(Error::InvalidArguments("the marker string must not be empty".into()).into());
    }
    if !is_bmp_path(&args.image) {
        return Err(Error::InvalidArguments(format!(
            "carrier image '{}' is not a .bmp file",
            args.image.to_string_lossy()
        ))
        .into());
    }
    if !is_bmp_path(&args.dest) {
        return Err(Error::InvalidArguments(format!(
            "output image '{}' is not a .bmp file",
            args.dest.to_string_lossy()
        ))
        .into());
    }

    let carrier_file = open_input(&args.image).with_context(|| {
        format!(
            "Unable to read carrier image: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let mut carrier = BufReader::new(carrier_file);

    let header = bmp::read_header(&mut carrier).with_context(|| {
        format!(
            "Carrier image '{}' is too small to be a valid BMP file.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let secret_file = open_input(&args.secret).with_context(|| {
        format!(
            "Unable to read secret file: {}",
            args.secret.to_string_lossy().red().bold()
        )
    })?;
    let secret_len = secret_file
        .metadata()
        .with_context(|| "Unable to determine the secret file size.")?
        .len();
    if u32::try_from(secret_len).is_err() {
        return Err(Error::InvalidArguments(format!(
            "secret file '{}' is larger than 4 GiB and cannot be framed",
            args.secret.to_string_lossy()
        ))
        .into());
    }

    let extension = secret_extension(&args.secret);

    // 容量检查必须发生在输出文件创建之前，容量不足时不留下任何字节。
    bmp::check_capacity(
        args.marker.len() as u64,
        extension.len() as u64,
        secret_len,
        bmp::payload_capacity(&header),
    )
    .with_context(|| {
        format!(
            "Not enough space in '{}' to hide '{}'.",
            args.image.to_string_lossy().red().bold(),
            args.secret.to_string_lossy().red().bold()
        )
    })?;

    let dest_file = create_output(&args.dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            args.dest.to_string_lossy().red().bold()
        )
    })?;
    let mut output = BufWriter::new(dest_file);

    let mut secret = BufReader::new(secret_file);
    let result = write_stego(
        &mut carrier,
        &header,
        &mut secret,
        secret_len as u32,
        &extension,
        &args.marker,
        &mut output,
    );

    if let Err(e) = result {
        // 失败后残留的半成品隐写图无效，直接移除。
        drop(output);
        let _ = fs::remove_file(&args.dest);
        return Err(e).with_context(|| {
            format!(
                "Failed to hide '{}' inside '{}'.",
                args.secret.to_string_lossy().red().bold(),
                args.image.to_string_lossy().red().bold()
            )
        });
    }

    println!(
        "The secret file has been successfully hidden and saved: {}",
        args.dest.to_string_lossy().green().bold()
    );

    Ok(())
}

fn write_stego<C: Read, P: Read, W: Write>(
    carrier: &mut C,
    header: &[u8],
    secret: &mut P,
    secret_len: u32,
    extension: &str,
    marker: &str,
    output: &mut W,
) -> Result<()> {
    output.write_all(header)?;

    let mut writer = FrameWriter::new(carrier, output);
    writer.write_marker(marker.as_bytes())?;
    writer.write_extension(extension)?;
    writer.write_payload(secret, secret_len)?;
    writer.copy_remaining()?;

    output.flush()?;
    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责跳过隐写图像的头部、先校验 magic 标记再创建输出文件，
/// 然后把解出的载荷流式写入输出，最后按恢复出的扩展名重命名文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * magic 字符串为空，或输入路径不是 .bmp 文件，或输出路径带扩展名。
/// * 无法打开隐写图像，或无法创建输出文件。
/// * 图像中没有以期望的 magic 标记开头的帧 (此时不会产生输出文件)。
/// * 解码过程中载体字节提前耗尽或发生其他 I/O 故障 (半成品会被移除)。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    if args.marker.is_empty() {
        return Err(Error::InvalidArguments("the marker string must not be empty".into()).into());
    }
    if !is_bmp_path(&args.image) {
        return Err(Error::InvalidArguments(format!(
            "stego image '{}' is not a .bmp file",
            args.image.to_string_lossy()
        ))
        .into());
    }
    if args.output.extension().is_some() {
        return Err(Error::InvalidArguments(format!(
            "output path '{}' must not carry an extension, the recovered one is appended",
            args.output.to_string_lossy()
        ))
        .into());
    }

    let image_file = open_input(&args.image).with_context(|| {
        format!(
            "Unable to read stego image: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let mut carrier = BufReader::new(image_file);
    let mut reader = FrameReader::new(&mut carrier);

    reader.skip_header().with_context(|| {
        format!(
            "Stego image '{}' is too small to be a valid BMP file.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    // 标记校验先于输出文件创建，标记不符时磁盘上不会出现任何输出。
    reader.verify_marker(args.marker.as_bytes()).with_context(|| {
        format!(
            "No hidden data found in '{}' with the given marker.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let extension = reader
        .read_extension()
        .with_context(|| "Failed to recover the original file extension.")?;
    let payload_len = reader
        .read_payload_len()
        .with_context(|| "Failed to recover the secret file length.")?;

    let out_file = create_output(&args.output).with_context(|| {
        format!(
            "Unable to write to output file: {}",
            args.output.to_string_lossy().red().bold()
        )
    })?;
    let mut output = BufWriter::new(out_file);

    let result = reader
        .read_payload(payload_len, &mut output)
        .and_then(|()| output.flush().map_err(Error::Io));

    if let Err(e) = result {
        // 半成品输出无效，移除后再上报错误。
        drop(output);
        let _ = fs::remove_file(&args.output);
        return Err(e).with_context(|| {
            format!(
                "Failed to recover the secret file from '{}'.",
                args.image.to_string_lossy().red().bold()
            )
        });
    }
    drop(output);

    let final_path = if extension.is_empty() {
        args.output.clone()
    } else {
        let mut name = args.output.clone().into_os_string();
        name.push(&extension);
        PathBuf::from(name)
    };

    if final_path != args.output {
        fs::rename(&args.output, &final_path).with_context(|| {
            format!(
                "Unable to rename the recovered file to: {}",
                final_path.to_string_lossy().red().bold()
            )
        })?;
    }

    println!(
        "The secret file has been successfully recovered and saved: {}",
        final_path.to_string_lossy().green().bold()
    );

    Ok(())
}
