use super::CaptureRequest;
use crate::errors::ValidationError;

/// Request-level preconditions. Per-tool problems are not checked here.
pub fn validate_request(request: &CaptureRequest) -> Result<(), ValidationError> {
    if request.device.trim().is_empty() {
        return Err(ValidationError::NoDevice);
    }
    if request.enabled.is_empty() {
        return Err(ValidationError::NoToolsEnabled);
    }
    // start/stop tools span the parallel phase and ignore the duration
    let timed = request.enabled.iter().any(|kind| kind.is_one_shot());
    if timed && request.duration.as_secs() == 0 {
        return Err(ValidationError::ZeroDuration);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combo::OutputSpec;
    use crate::tool::ToolKind;

    fn request(device: &str, secs: u64) -> CaptureRequest {
        CaptureRequest::new(device, secs, OutputSpec::new("out"))
    }

    #[test]
    fn blank_device_is_rejected_first() {
        let req = request("  ", 10);
        assert_eq!(validate_request(&req), Err(ValidationError::NoDevice));
    }

    #[test]
    fn no_tools_is_rejected() {
        assert_eq!(
            validate_request(&request("D1", 10)),
            Err(ValidationError::NoToolsEnabled)
        );
    }

    #[test]
    fn zero_duration_is_rejected() {
        let req = request("D1", 0).enable(ToolKind::TraceEvents);
        assert_eq!(validate_request(&req), Err(ValidationError::ZeroDuration));
    }

    #[test]
    fn zero_duration_is_allowed_for_start_stop_only() {
        let req = request("D1", 0).enable(ToolKind::MethodTracer);
        assert_eq!(validate_request(&req), Ok(()));

        let mixed = req.enable(ToolKind::SystemTrace);
        assert_eq!(validate_request(&mixed), Err(ValidationError::ZeroDuration));
    }

    #[test]
    fn missing_target_is_not_a_request_error() {
        let req = request("D1", 10).enable(ToolKind::MethodTracer);
        assert_eq!(validate_request(&req), Ok(()));
    }
}
