//! 输入验证模块
//!
//! 命令行传入的向量均为逗号分隔的浮点数。

use anyhow::{Context, Result};

/// 解析逗号分隔的向量，并检查长度与有限性
///
/// # 错误
/// 如果：
/// - 任何元素无法解析为浮点数
/// - 元素个数不等于 `expected`
/// - 元素为 NaN 或无穷大
pub fn parse_vector(name: &str, text: &str, expected: usize) -> Result<Vec<f64>> {
    let values: Vec<f64> = text
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("解析 {name} 失败: {text:?}"))?;

    if values.len() != expected {
        anyhow::bail!("{name} 需要 {expected} 个元素，得到 {} 个", values.len());
    }

    for (i, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            anyhow::bail!(
                "{name}[{i}] 无效: {}",
                if value.is_nan() { "NaN" } else { "无穷大" }
            );
        }
    }

    Ok(values)
}

/// 校验仿真步长
pub fn validate_time_step(dt: f64) -> Result<()> {
    if !(dt.is_finite() && dt > 0.0 && dt <= 0.1) {
        anyhow::bail!("时间步长 {dt} 超出范围 (0, 0.1] 秒");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vector() {
        let v = parse_vector("q", "0.1, -0.2,0.3", 3).unwrap();
        assert_eq!(v, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_parse_vector_wrong_length() {
        assert!(parse_vector("q", "0.1,0.2", 3).is_err());
    }

    #[test]
    fn test_parse_vector_garbage() {
        assert!(parse_vector("q", "0.1,abc,0.3", 3).is_err());
        assert!(parse_vector("q", "", 1).is_err());
    }

    #[test]
    fn test_parse_vector_non_finite() {
        let err = parse_vector("action", "0.1,NaN", 2).unwrap_err();
        assert!(err.to_string().contains("NaN"));
        assert!(parse_vector("action", "inf,0", 2).is_err());
    }

    #[test]
    fn test_validate_time_step() {
        assert!(validate_time_step(1e-3).is_ok());
        assert!(validate_time_step(0.0).is_err());
        assert!(validate_time_step(-1e-3).is_err());
        assert!(validate_time_step(1.0).is_err());
        assert!(validate_time_step(f64::NAN).is_err());
    }
}
