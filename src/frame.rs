//! # 帧编排模块
//!
//! 把位级打包/解包操作组合成自描述的帧格式，按固定顺序嵌入载体像素区：
//!
//! ```text
//! magic 标记 → 扩展名长度 (u32) → 扩展名 → 载荷长度 (u32) → 载荷
//! ```
//!
//! [`FrameWriter`] 负责编码方向，[`FrameReader`] 负责解码方向。
//! 两侧的位序必须严格互逆，否则往返就会失真。

use std::io::{Read, Write};

use crate::bmp;
use crate::constants::BMP_HEADER_SIZE;
use crate::error::{Error, Result};
use crate::steganography::{pack_byte, pack_u32, unpack_byte, unpack_u32};

/// 编码方向的帧写入器。
///
/// 持有已越过头部的载体流和已写入头部的输出流，按帧格式逐字段打包。
/// 每一步都是对前一步成功的硬依赖，任何一步失败立即中止。
pub struct FrameWriter<'a, C: Read, W: Write> {
    carrier: &'a mut C,
    output: &'a mut W,
}

impl<'a, C: Read, W: Write> FrameWriter<'a, C, W> {
    pub fn new(carrier: &'a mut C, output: &'a mut W) -> Self {
        Self { carrier, output }
    }

    /// 逐字节打包 magic 标记。标记本身的长度不写入帧，
    /// 由编解码双方在带外约定。
    pub fn write_marker(&mut self, marker: &[u8]) -> Result<()> {
        for &byte in marker {
            pack_byte(byte, self.carrier, self.output, "hiding the marker")?;
        }

        Ok(())
    }

    /// 打包扩展名长度 (u32) 和扩展名本身 (含开头的 '.')。
    pub fn write_extension(&mut self, extension: &str) -> Result<()> {
        pack_u32(
            extension.len() as u32,
            self.carrier,
            self.output,
            "hiding the extension length",
        )?;

        for &byte in extension.as_bytes() {
            pack_byte(byte, self.carrier, self.output, "hiding the file extension")?;
        }

        Ok(())
    }

    /// 打包载荷长度 (u32)，然后从秘密文件流逐字节读入并打包。
    ///
    /// `payload_len` 必须恰好等于 `payload` 中可读出的字节数；
    /// 流提前结束说明秘密文件在编码过程中被截断，按 I/O 故障上报。
    pub fn write_payload<P: Read>(&mut self, payload: &mut P, payload_len: u32) -> Result<()> {
        pack_u32(
            payload_len,
            self.carrier,
            self.output,
            "hiding the secret length",
        )?;

        let mut byte = [0u8; 1];
        for _ in 0..payload_len {
            payload.read_exact(&mut byte)?;
            pack_byte(byte[0], self.carrier, self.output, "hiding the secret data")?;
        }

        Ok(())
    }

    /// 帧写完后把载体剩余的像素字节原样透传到输出。
    pub fn copy_remaining(&mut self) -> Result<u64> {
        bmp::copy_remaining(self.carrier, self.output)
    }
}

/// 解码方向的帧读取器。
///
/// 状态机按 `跳过头部 → 校验标记 → 读扩展名 → 读载荷长度 → 读载荷`
/// 的顺序推进；标记不匹配或载体提前耗尽即进入失败态。
/// 标记校验必须先于任何输出写入，这样不合法的图像绝不会产生输出文件。
pub struct FrameReader<'a, C: Read> {
    carrier: &'a mut C,
}

impl<'a, C: Read> FrameReader<'a, C> {
    pub fn new(carrier: &'a mut C) -> Self {
        Self { carrier }
    }

    /// 无条件跳过开头的 54 字节 BMP 头部。
    pub fn skip_header(&mut self) -> Result<()> {
        let mut header = [0u8; BMP_HEADER_SIZE];
        self.carrier.read_exact(&mut header).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::UnexpectedEndOfCarrier {
                phase: "skipping the BMP header",
            },
            _ => Error::Io(e),
        })?;

        Ok(())
    }

    /// 解包 `expected.len()` 个字节并与期望的 magic 标记逐字节比较。
    ///
    /// # Errors
    ///
    /// 不一致时返回 [`Error::MarkerMismatch`]。
    pub fn verify_marker(&mut self, expected: &[u8]) -> Result<()> {
        let mut decoded = Vec::with_capacity(expected.len());
        for _ in 0..expected.len() {
            decoded.push(unpack_byte(self.carrier, "verifying the marker")?);
        }

        if decoded != expected {
            return Err(Error::MarkerMismatch);
        }

        Ok(())
    }

    /// 解包扩展名长度字段，再解包同样多的字节得到扩展名。
    ///
    /// 缓冲区按实际解出的字节逐个增长，长度字段损坏时最多读穿载体
    /// 并得到 [`Error::UnexpectedEndOfCarrier`]，不存在定长缓冲溢出。
    pub fn read_extension(&mut self) -> Result<String> {
        let ext_len = unpack_u32(self.carrier, "recovering the extension length")?;

        let mut extension = Vec::new();
        for _ in 0..ext_len {
            extension.push(unpack_byte(self.carrier, "recovering the file extension")?);
        }

        Ok(String::from_utf8_lossy(&extension).into_owned())
    }

    /// 解包载荷长度字段。
    pub fn read_payload_len(&mut self) -> Result<u32> {
        unpack_u32(self.carrier, "recovering the secret length")
    }

    /// 解包 `payload_len` 个载荷字节，每解出一个立即写入输出流。
    /// 载荷全程流式经过，绝不整体驻留内存。
    pub fn read_payload<W: Write>(&mut self, payload_len: u32, output: &mut W) -> Result<()> {
        for _ in 0..payload_len {
            let byte = unpack_byte(self.carrier, "recovering the secret data")?;
            output.write_all(&[byte])?;
        }

        Ok(())
    }
}
