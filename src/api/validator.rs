// ==========================================
// 厂区温度风险引擎 - 新建厂区输入校验
// ==========================================
// 职责: 在分级之前拒绝不完整/越界的输入
// 说明: 分级器只接收校验后的数值坐标
// ==========================================

use crate::api::dto::CreateFacilityRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::facility::{is_valid_latitude, is_valid_longitude};
use crate::domain::NewFacility;

/// 必填文本字段
fn required_text(value: &Option<String>, field: &str) -> ApiResult<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::InvalidInput(format!("缺少字段 {}", field)))
}

/// 必填数值字段
fn required_number(value: Option<f64>, field: &str) -> ApiResult<f64> {
    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::InvalidInput(format!("缺少字段 {}", field)))
}

/// 校验新建厂区请求
///
/// # 规则
/// - factoryName / address / country 非空
/// - latitude ∈ [-90, 90]，longitude ∈ [-180, 180]
/// - yearlyRevenue >= 0
pub fn validate_create_request(request: &CreateFacilityRequest) -> ApiResult<NewFacility> {
    let name = required_text(&request.factory_name, "factoryName")?;
    let address = required_text(&request.address, "address")?;
    let country = required_text(&request.country, "country")?;

    let latitude = required_number(request.latitude, "latitude")?;
    if !is_valid_latitude(latitude) {
        return Err(ApiError::InvalidInput(format!(
            "latitude 超出范围 [-90, 90]: {}",
            latitude
        )));
    }

    let longitude = required_number(request.longitude, "longitude")?;
    if !is_valid_longitude(longitude) {
        return Err(ApiError::InvalidInput(format!(
            "longitude 超出范围 [-180, 180]: {}",
            longitude
        )));
    }

    let yearly_revenue = required_number(request.yearly_revenue, "yearlyRevenue")?;
    if yearly_revenue < 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "yearlyRevenue 不能为负数: {}",
            yearly_revenue
        )));
    }

    Ok(NewFacility {
        name,
        address,
        country,
        latitude,
        longitude,
        yearly_revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateFacilityRequest {
        CreateFacilityRequest {
            factory_name: Some("Paris Plant".to_string()),
            address: Some("1 Rue de Rivoli".to_string()),
            country: Some("France".to_string()),
            latitude: Some(48.87),
            longitude: Some(2.35),
            yearly_revenue: Some(5_000_000.0),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let facility = validate_create_request(&valid_request()).unwrap();
        assert_eq!(facility.name, "Paris Plant");
        assert_eq!(facility.latitude, 48.87);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut request = valid_request();
        request.factory_name = Some("   ".to_string());
        assert!(matches!(
            validate_create_request(&request),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_coordinate_is_rejected() {
        let mut request = valid_request();
        request.longitude = None;
        assert!(matches!(
            validate_create_request(&request),
            Err(ApiError::InvalidInput(msg)) if msg.contains("longitude")
        ));
    }

    #[test]
    fn test_out_of_range_latitude_is_rejected() {
        let mut request = valid_request();
        request.latitude = Some(-91.0);
        assert!(validate_create_request(&request).is_err());
    }

    #[test]
    fn test_negative_revenue_is_rejected() {
        let mut request = valid_request();
        request.yearly_revenue = Some(-1.0);
        assert!(validate_create_request(&request).is_err());
    }
}
