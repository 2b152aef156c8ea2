use crate::errors::{RecordsError, Result};
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 解析 yyyy-MM-dd 格式的日期
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        RecordsError::date_parse(format!(
            "Invalid date '{value}'. Use yyyy-MM-dd"
        ))
    })
}

/// 解析可选的日期参数
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    value.map(parse_date).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-10").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
    }

    #[test]
    fn test_parse_invalid_date() {
        for bad in ["2024-13-40", "10/01/2024", "", "2024-02-30"] {
            let err = parse_date(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadRequest, "{bad}");
        }
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert!(parse_optional_date(Some("2024-01-01")).unwrap().is_some());
        assert!(parse_optional_date(Some("nope")).is_err());
    }
}
