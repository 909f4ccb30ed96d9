//! # 行布局模块
//!
//! 负责行字节数的 4 字节对齐，以及“整块缓冲区 + 行起始偏移”的尺寸计算。
//! 所有乘法都做溢出检查，溢出按分配失败处理。

/// 输出缓冲区每行的对齐字节数。
pub const ROW_ALIGNMENT: usize = 4;

/// 将行字节数向上取整到 4 的倍数。
///
/// 对任意正数等价于 `row_bytes + (3 - ((row_bytes - 1) % 4))`；`0` 仍为 `0`。
pub fn align_row_bytes(row_bytes: usize) -> usize {
    row_bytes.next_multiple_of(ROW_ALIGNMENT)
}

/// 一帧图像在输出缓冲区中的行布局。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// 解码库报告的每行有效字节数。
    pub row_bytes: usize,
    /// 对齐后的行跨度。
    pub stride: usize,
    /// 行数。
    pub height: usize,
}

impl RowLayout {
    pub fn new(row_bytes: usize, height: usize) -> Self {
        Self {
            row_bytes,
            stride: align_row_bytes(row_bytes),
            height,
        }
    }

    /// 像素区字节数（`stride * height`），溢出时返回 `None`。
    pub fn image_len(&self) -> Option<usize> {
        self.stride.checked_mul(self.height)
    }

    /// 含尾部冗余的缓冲区总字节数。
    pub fn buffer_len(&self, slack_bytes: usize) -> Option<usize> {
        self.image_len()?.checked_add(slack_bytes)
    }

    /// 第 `row` 行在缓冲区中的起始偏移。
    pub fn row_offset(&self, row: usize) -> usize {
        row * self.stride
    }

    /// 自上而下的全部行起始偏移。
    pub fn row_offsets(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.height).map(|row| self.row_offset(row))
    }
}
