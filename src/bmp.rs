//! # BMP 容器模块
//!
//! 负责对 24 位 BMP 容器本身的处理：读取 54 字节头部、按头部字段估算
//! 隐写容量、以及把帧之后剩余的像素字节原样透传到输出。
//! 头部永远按原样复制，任何位修改都只发生在像素数据区。

use std::io::{ErrorKind, Read, Write, copy};

use crate::constants::{BMP_HEADER_SIZE, HEIGHT_OFFSET, LENGTH_FIELDS_OVERHEAD, WIDTH_OFFSET};
use crate::error::{Error, Result};

/// 从载体流读出完整的 54 字节 BMP 头部。
///
/// # Errors
///
/// 流中不足 54 字节时返回 [`Error::UnexpectedEndOfCarrier`]。
pub fn read_header<R: Read>(carrier: &mut R) -> Result<[u8; BMP_HEADER_SIZE]> {
    let mut header = [0u8; BMP_HEADER_SIZE];
    carrier.read_exact(&mut header).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => Error::UnexpectedEndOfCarrier {
            phase: "reading the BMP header",
        },
        _ => Error::Io(e),
    })?;

    Ok(header)
}

fn header_field_le_u32(header: &[u8; BMP_HEADER_SIZE], offset: usize) -> u32 {
    u32::from_le_bytes([
        header[offset],
        header[offset + 1],
        header[offset + 2],
        header[offset + 3],
    ])
}

/// 按头部的宽高字段计算像素数据区的字节数：宽 × 高 × 3 (每像素 3 字节)。
///
/// 宽高字段来自输入文件，不可信。两个 u32 的乘积必然落在 u64 内，
/// 再乘 3 则可能越界，此时饱和到 `u64::MAX`；这样的容量声明远超任何
/// 真实文件，编码会在嵌入途中因载体耗尽而失败。
pub fn pixel_capacity(header: &[u8; BMP_HEADER_SIZE]) -> u64 {
    let width = u64::from(header_field_le_u32(header, WIDTH_OFFSET));
    let height = u64::from(header_field_le_u32(header, HEIGHT_OFFSET));
    (width * height).saturating_mul(3)
}

/// 像素数据区最多能容纳的完整载荷字节数。
/// 每个载体字节只承载 1 bit，因此是像素字节数除以 8 (向下取整)。
pub fn payload_capacity(header: &[u8; BMP_HEADER_SIZE]) -> u64 {
    pixel_capacity(header) / 8
}

/// 在写出任何一个字节之前检查容量。
///
/// 帧总共需要 `marker_len + ext_len + payload_len + 8` 个载荷字节
/// (两个 `4` 是扩展名长度与载荷长度两个 32 位字段)，超过 `available`
/// 即告不足。编码流程中途耗尽载体属于实现缺陷，这个前置检查保证
/// 合法输入永远到不了那一步。
///
/// # Errors
///
/// 容量不足时返回 [`Error::InsufficientCapacity`]，附带需要/可用字节数。
pub fn check_capacity(
    marker_len: u64,
    ext_len: u64,
    payload_len: u64,
    available: u64,
) -> Result<()> {
    let required = payload_len + marker_len + ext_len + LENGTH_FIELDS_OVERHEAD;
    if required > available {
        return Err(Error::InsufficientCapacity {
            required,
            available,
        });
    }

    Ok(())
}

/// 把载体流中剩余的全部字节原样复制到输出流。
/// 用于帧写完之后的尾部像素透传，保证隐写图与原图同尺寸。
pub fn copy_remaining<R: Read, W: Write>(carrier: &mut R, output: &mut W) -> Result<u64> {
    Ok(copy(carrier, output)?)
}
