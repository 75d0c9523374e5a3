//! DocuWare account logon and logoff
//!
//! Logon needs the organization name and a license type next to the
//! credentials; the returned session cookie lives in the client's cookie jar.

use log::{error, info};

use crate::error::SyncError;

const LICENSE_TYPE: &str = "NamedUser";

pub(super) async fn logon(
    http: &reqwest::Client,
    base_url: &str,
    user: &str,
    password: &str,
    organization: &str,
) -> Result<(), SyncError> {
    let params = [
        ("UserName", user),
        ("Password", password),
        ("Organization", organization),
        ("LicenseType", LICENSE_TYPE),
    ];

    let response = http
        .post(format!("{base_url}/Account/Logon"))
        .form(&params)
        .send()
        .await
        .map_err(|e| SyncError::Auth(format!("logon endpoint unreachable: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SyncError::Auth(format!(
            "logon rejected with status {status}: {body}"
        )));
    }

    info!("DocuWare logon successful for organization '{organization}'");
    Ok(())
}

/// Best-effort: a failed logoff is logged but never fails the workflow.
pub(super) async fn logoff(http: &reqwest::Client, base_url: &str) {
    match http.post(format!("{base_url}/Account/Logoff")).send().await {
        Ok(_) => info!("DocuWare logoff successful"),
        Err(e) => error!("DocuWare logoff failed: {e}"),
    }
}
