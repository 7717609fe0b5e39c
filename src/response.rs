//! 统一响应封装
//! 所有端点返回 {code, message, data} 结构，code 与 HTTP 状态码一致

use serde::Serialize;

/// 通用响应封装
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// 状态码，200 表示成功
    pub code: u16,
    /// 响应提示信息
    pub message: String,
    /// 响应数据，失败时为 null
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success_with_message("Login success", "token123");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["message"], "Login success");
        assert_eq!(json["data"], "token123");
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let resp: ApiResponse<serde_json::Value> = ApiResponse::error(401, "Invalid or expired token");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 401);
        assert!(json["data"].is_null());
    }
}
