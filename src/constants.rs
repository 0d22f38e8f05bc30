/// BMP 文件的标准头部大小 (字节)。
/// 编码时头部按原样复制到输出，绝不做位修改；解码时直接跳过。
pub const BMP_HEADER_SIZE: usize = 54;

/// BMP 头部中图像宽度字段的字节偏移 (小端 32 位无符号整数)。
pub const WIDTH_OFFSET: usize = 18;

/// BMP 头部中图像高度字段的字节偏移 (小端 32 位无符号整数)。
pub const HEIGHT_OFFSET: usize = 22;

/// 隐藏 1 字节载荷所需的载体字节数。
/// 每个载体字节的最低有效位只承载 1 bit，因此 8 bits 需要 8 个载体字节。
pub const CARRIER_BYTES_PER_BYTE: usize = 8;

/// 隐藏一个 32 位长度字段所需的载体字节数。
pub const CARRIER_BYTES_PER_U32: usize = 32;

/// 帧中两个 32 位长度字段 (扩展名长度 + 载荷长度) 合计占用的载荷字节数。
pub const LENGTH_FIELDS_OVERHEAD: u64 = 8;
