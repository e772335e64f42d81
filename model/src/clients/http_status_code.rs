pub use http::StatusCode;

/// Exposes the HTTP status of a failed API call, when there was one.
pub trait HttpStatusCode {
    fn status_code(&self) -> Option<StatusCode>;

    /// `true` when the API server answered `404 Not Found`, e.g. when deleting a pod that is
    /// already gone.
    fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }
}

impl HttpStatusCode for kube::Error {
    fn status_code(&self) -> Option<StatusCode> {
        match self {
            kube::Error::Api(response) => StatusCode::from_u16(response.code).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use kube::error::ErrorResponse;

    fn api_error(code: u16) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".into(),
            message: "pods \"liveness-exec\" not found".into(),
            reason: "NotFound".into(),
            code,
        })
    }

    #[test]
    fn not_found() {
        assert!(api_error(404).is_not_found());
        assert!(!api_error(409).is_not_found());
        assert_eq!(api_error(409).status_code(), Some(StatusCode::CONFLICT));
    }
}
