//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 [`HttpClient`]，超时由 `AbortController` 完成。

use async_trait::async_trait;
use estatecrm::request::{FormPart, HttpBody, HttpClient, HttpError, HttpRequest, HttpResponse};
use gloo_timers::callback::Timeout;
use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

/// 浏览器 fetch 客户端
///
/// 无状态，可以随意复制并放进信号或 Context。
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

fn form_data(parts: &[FormPart]) -> Result<FormData, HttpError> {
    let form = FormData::new().map_err(|e| HttpError::Build(js_error(e)))?;
    for part in parts {
        match &part.filename {
            None => {
                let text = String::from_utf8_lossy(&part.data);
                form.append_with_str(&part.name, &text)
                    .map_err(|e| HttpError::Build(js_error(e)))?;
            }
            Some(filename) => {
                let bytes = Uint8Array::from(part.data.as_slice());
                let chunks = js_sys::Array::of1(&bytes);
                let options = BlobPropertyBag::new();
                if let Some(content_type) = &part.content_type {
                    options.set_type(content_type);
                }
                let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
                    .map_err(|e| HttpError::Build(js_error(e)))?;
                form.append_with_blob_and_filename(&part.name, &blob, filename)
                    .map_err(|e| HttpError::Build(js_error(e)))?;
            }
        }
    }
    Ok(form)
}

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new().map_err(|e| HttpError::Build(format!("创建 Headers 失败: {}", js_error(e))))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::Build(format!("设置 Header 失败: {}", js_error(e))))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            HttpBody::Empty => {}
            HttpBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
            HttpBody::Multipart(parts) => opts.set_body(&form_data(parts)?.into()),
        }

        // 超时后中止请求；Timeout 被 drop 时自动取消
        let controller = AbortController::new().map_err(|e| HttpError::Build(js_error(e)))?;
        opts.set_signal(Some(&controller.signal()));
        let _deadline = req.timeout.map(|timeout| {
            let controller = controller.clone();
            Timeout::new(timeout.as_millis() as u32, move || controller.abort())
        });

        let request = Request::new_with_str_and_init(&req.url, &opts).map_err(|e| HttpError::Build(js_error(e)))?;
        let window = web_sys::window().ok_or_else(|| HttpError::Network("无法获取 window 对象".to_string()))?;

        let aborted = |e: JsValue| {
            if controller.signal().aborted() {
                HttpError::Timeout(req.timeout.unwrap_or_default())
            } else {
                HttpError::Network(js_error(e))
            }
        };

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(aborted)?;
        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::Body(format!("Response 类型转换失败: {}", js_error(e))))?;

        let status = response.status();
        let text = response.text().map_err(|e| HttpError::Body(js_error(e)))?;
        let body = JsFuture::from(text)
            .await
            .map_err(aborted)?
            .as_string()
            .ok_or_else(|| HttpError::Body("无法转换为字符串".to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
