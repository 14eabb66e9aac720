//! The OCR invocation node.
//!
//! Execution is sequential and item-paired: items are processed strictly in
//! input order, one remote call in flight at a time, and every item yields
//! output paired to its index. Two failure channels exist and must not be
//! conflated:
//!
//! - a rejected remote call always becomes an inline error item, regardless
//!   of the host's fail-fast setting;
//! - a local failure before the call honors the fail-fast setting: it either
//!   becomes an error item or aborts the execution annotated with the item
//!   index.

use serde_json::Value;
use tcocr_client::{InvoiceRecognizer, OcrClient, OcrConfig, OcrCredentials, RecognitionRequest};

use crate::TRACING_TARGET;
use crate::context::{InputItem, NodeContext, OutputItem};
use crate::descriptor::{NodeDescriptor, NodeProperty};
use crate::error::{NodeError, NodeResult};

/// Parameter name for the credential secret ID.
pub const PARAM_SECRET_ID: &str = "secretId";
/// Parameter name for the credential secret key.
pub const PARAM_SECRET_KEY: &str = "secretKey";
/// Parameter name for the item field carrying the base64 image.
pub const PARAM_IMAGE_BASE64_FIELD: &str = "imageBase64Field";

/// Default item field read when `imageBase64Field` is unset.
pub const DEFAULT_IMAGE_BASE64_FIELD: &str = "data";

/// Workflow node invoking Tencent Cloud OCR general invoice recognition.
#[derive(Debug, Clone, Copy, Default)]
pub struct TencentOcrNode;

impl TencentOcrNode {
    /// Returns the host-visible description of this node.
    pub fn descriptor() -> NodeDescriptor {
        NodeDescriptor {
            display_name: "Tencent Cloud OCR".to_owned(),
            name: "tencentCloudOcr".to_owned(),
            description: "Recognize general invoices via the Tencent Cloud OCR API".to_owned(),
            inputs: 1,
            outputs: 1,
            properties: vec![
                NodeProperty::string(PARAM_SECRET_ID, "Secret ID")
                    .masked()
                    .with_placeholder("Input SecretId"),
                NodeProperty::string(PARAM_SECRET_KEY, "Secret Key")
                    .masked()
                    .with_placeholder("Input SecretKey"),
                NodeProperty::string(PARAM_IMAGE_BASE64_FIELD, "ImageBase64 Field")
                    .with_default(DEFAULT_IMAGE_BASE64_FIELD)
                    .with_placeholder("ImageBase64 Field"),
            ],
        }
    }

    /// Executes the node against the host context.
    ///
    /// Resolves credentials once (parameters are not per-item; the
    /// first-item context is used), builds one fixed-endpoint client for
    /// the whole execution, and runs the per-item loop.
    pub async fn execute<C: NodeContext>(ctx: &C) -> NodeResult<Vec<Vec<OutputItem>>> {
        let secret_id = string_parameter(ctx, PARAM_SECRET_ID, "");
        let secret_key = string_parameter(ctx, PARAM_SECRET_KEY, "");

        let credentials = OcrCredentials::new(secret_id, secret_key);
        let client = OcrClient::new(OcrConfig::default(), credentials)?;

        Self::execute_with(ctx, &client).await
    }

    /// Executes the per-item loop against an injected recognizer.
    ///
    /// This is the whole behavioral surface of the node; [`execute`] only
    /// adds client construction on top. Returns the accumulated output
    /// wrapped in the node's single output channel.
    ///
    /// [`execute`]: TencentOcrNode::execute
    pub async fn execute_with<C, R>(ctx: &C, recognizer: &R) -> NodeResult<Vec<Vec<OutputItem>>>
    where
        C: NodeContext,
        R: InvoiceRecognizer + ?Sized,
    {
        let field = string_parameter(ctx, PARAM_IMAGE_BASE64_FIELD, DEFAULT_IMAGE_BASE64_FIELD);
        let items = ctx.input_data();

        tracing::debug!(
            target: TRACING_TARGET,
            node = ctx.node_name(),
            item_count = items.len(),
            field,
            "Starting node execution"
        );

        let mut return_data = Vec::with_capacity(items.len());

        for (item_index, item) in items.iter().enumerate() {
            let request = match build_request(item, &field, item_index) {
                Ok(request) => request,
                Err(err) => {
                    if ctx.continue_on_fail() {
                        tracing::warn!(
                            target: TRACING_TARGET,
                            item_index,
                            error = %err,
                            "Item failed locally; continuing"
                        );
                        return_data.push(OutputItem::error(err.isolation_message(), item_index));
                        continue;
                    }
                    return Err(err.into_abort(ctx.node_name(), item_index));
                }
            };

            match recognizer.recognize_general_invoice(request).await {
                Ok(response) => {
                    let payloads = ctx.return_json_array(response);
                    return_data.extend(ctx.construct_execution_metadata(payloads, item_index));
                }
                Err(err) => {
                    // Remote rejections are isolated unconditionally: the
                    // error becomes an ordinary output item even when the
                    // host asked for fail-fast behavior.
                    tracing::warn!(
                        target: TRACING_TARGET,
                        item_index,
                        error = %err,
                        "Recognition call failed"
                    );
                    return_data.push(OutputItem::error(err.message(), item_index));
                }
            }
        }

        tracing::debug!(
            target: TRACING_TARGET,
            node = ctx.node_name(),
            output_count = return_data.len(),
            "Node execution completed"
        );

        Ok(vec![return_data])
    }
}

/// Builds the recognition request for one item.
///
/// The configured field is forwarded verbatim when present and omitted when
/// absent; the only local failure is a payload that is not a JSON object.
fn build_request(item: &InputItem, field: &str, item_index: usize) -> NodeResult<RecognitionRequest> {
    match &item.json {
        Value::Object(payload) => Ok(RecognitionRequest::new(payload.get(field).cloned())),
        _ => Err(NodeError::item_payload(item_index)),
    }
}

fn string_parameter<C: NodeContext>(ctx: &C, name: &str, default: &str) -> String {
    match ctx.get_node_parameter(name, 0, Value::String(default.to_owned())) {
        Value::String(value) => value,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde_json::json;
    use tcocr_client::{Error as ClientError, Result as ClientResult};

    use super::*;
    use crate::context::MemoryContext;

    /// Recognizer returning pre-scripted outcomes in call order.
    #[derive(Default)]
    struct ScriptedRecognizer {
        outcomes: Mutex<VecDeque<ClientResult<Value>>>,
        requests: Mutex<Vec<RecognitionRequest>>,
    }

    impl ScriptedRecognizer {
        fn new(outcomes: Vec<ClientResult<Value>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<RecognitionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl InvoiceRecognizer for ScriptedRecognizer {
        async fn recognize_general_invoice(
            &self,
            request: RecognitionRequest,
        ) -> ClientResult<Value> {
            self.requests.lock().unwrap().push(request);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("an outcome is scripted for every call")
        }
    }

    fn remote_error(message: &str) -> ClientError {
        ClientError::api("InternalError", message, None)
    }

    fn item(payload: Value) -> InputItem {
        InputItem::new(payload)
    }

    #[tokio::test]
    async fn outputs_pair_with_input_indices_in_order() {
        let ctx = MemoryContext::new("Tencent OCR").with_items(vec![
            item(json!({"data": "AAA"})),
            item(json!({"data": "BBB"})),
            item(json!({"data": "CCC"})),
        ]);
        let recognizer = ScriptedRecognizer::new(vec![
            Ok(json!({"text": "one"})),
            Ok(json!({"text": "two"})),
            Ok(json!({"text": "three"})),
        ]);

        let output = TencentOcrNode::execute_with(&ctx, &recognizer)
            .await
            .expect("execution succeeds");

        assert_eq!(output.len(), 1, "single output channel");
        let branch = &output[0];
        assert_eq!(branch.len(), 3);
        for (index, item) in branch.iter().enumerate() {
            assert_eq!(item.paired_item, index);
        }
        assert_eq!(branch[1].json, json!({"text": "two"}));
    }

    #[tokio::test]
    async fn default_field_is_data() {
        let ctx = MemoryContext::new("Tencent OCR")
            .with_item(item(json!({"data": "aGVsbG8="})));
        let recognizer = ScriptedRecognizer::new(vec![Ok(json!({}))]);

        TencentOcrNode::execute_with(&ctx, &recognizer)
            .await
            .expect("execution succeeds");

        let requests = recognizer.requests();
        assert_eq!(requests[0].image_base64, Some(json!("aGVsbG8=")));
    }

    #[tokio::test]
    async fn configured_field_overrides_default() {
        let ctx = MemoryContext::new("Tencent OCR")
            .with_parameter(PARAM_IMAGE_BASE64_FIELD, "img")
            .with_item(item(json!({"img": "ABC", "data": "ZZZ"})));
        let recognizer = ScriptedRecognizer::new(vec![Ok(json!({}))]);

        TencentOcrNode::execute_with(&ctx, &recognizer)
            .await
            .expect("execution succeeds");

        let requests = recognizer.requests();
        assert_eq!(requests[0].image_base64, Some(json!("ABC")));
    }

    #[tokio::test]
    async fn missing_field_is_forwarded_as_absent() {
        let ctx = MemoryContext::new("Tencent OCR").with_item(item(json!({"other": 1})));
        let recognizer = ScriptedRecognizer::new(vec![Ok(json!({}))]);

        TencentOcrNode::execute_with(&ctx, &recognizer)
            .await
            .expect("execution succeeds");

        let requests = recognizer.requests();
        assert_eq!(requests[0].image_base64, None);
    }

    #[tokio::test]
    async fn remote_rejection_is_isolated_even_with_fail_fast() {
        // continue_on_fail is off, yet a rejected remote call must not
        // abort the run.
        let ctx = MemoryContext::new("Tencent OCR")
            .with_continue_on_fail(false)
            .with_items(vec![
                item(json!({"data": "AAA"})),
                item(json!({"data": "BBB"})),
                item(json!({"data": "CCC"})),
            ]);
        let recognizer = ScriptedRecognizer::new(vec![
            Ok(json!({"text": "one"})),
            Err(remote_error("auth rejected")),
            Ok(json!({"text": "three"})),
        ]);

        let output = TencentOcrNode::execute_with(&ctx, &recognizer)
            .await
            .expect("remote failures never abort");

        let branch = &output[0];
        assert_eq!(branch.len(), 3);
        assert_eq!(branch[1].json, json!({"error": "auth rejected"}));
        assert_eq!(branch[1].paired_item, 1);
        assert_eq!(branch[2].json, json!({"text": "three"}));
    }

    #[tokio::test]
    async fn success_then_remote_timeout_scenario() {
        let ctx = MemoryContext::new("Tencent OCR").with_items(vec![
            item(json!({"data": "AAA"})),
            item(json!({"data": "BBB"})),
        ]);
        let recognizer = ScriptedRecognizer::new(vec![
            Ok(json!({"text": "INV-1"})),
            Err(remote_error("timeout")),
        ]);

        let output = TencentOcrNode::execute_with(&ctx, &recognizer)
            .await
            .expect("execution succeeds");

        assert_eq!(
            output,
            vec![vec![
                OutputItem::new(json!({"text": "INV-1"}), 0),
                OutputItem::new(json!({"error": "timeout"}), 1),
            ]]
        );
    }

    #[tokio::test]
    async fn local_failure_continues_when_isolation_enabled() {
        let ctx = MemoryContext::new("Tencent OCR")
            .with_continue_on_fail(true)
            .with_items(vec![
                item(json!("not an object")),
                item(json!({"data": "BBB"})),
            ]);
        let recognizer = ScriptedRecognizer::new(vec![Ok(json!({"text": "two"}))]);

        let output = TencentOcrNode::execute_with(&ctx, &recognizer)
            .await
            .expect("isolated execution succeeds");

        let branch = &output[0];
        assert_eq!(branch.len(), 2);
        assert_eq!(
            branch[0].json,
            json!({"error": "item 0 payload is not a JSON object"})
        );
        assert_eq!(branch[0].paired_item, 0);
        assert_eq!(branch[1].json, json!({"text": "two"}));
        assert_eq!(branch[1].paired_item, 1);
    }

    #[tokio::test]
    async fn local_failure_aborts_when_fail_fast() {
        let ctx = MemoryContext::new("Tencent OCR")
            .with_continue_on_fail(false)
            .with_items(vec![
                item(json!({"data": "AAA"})),
                item(json!("not an object")),
                item(json!({"data": "CCC"})),
            ]);
        let recognizer = ScriptedRecognizer::new(vec![Ok(json!({"text": "one"}))]);

        let err = TencentOcrNode::execute_with(&ctx, &recognizer)
            .await
            .expect_err("fail-fast aborts");

        assert_eq!(err.item_index(), Some(1));
        // No call was issued for the failing item or anything after it.
        assert_eq!(recognizer.requests().len(), 1);
    }

    #[tokio::test]
    async fn array_response_expands_into_multiple_outputs() {
        let ctx = MemoryContext::new("Tencent OCR").with_item(item(json!({"data": "AAA"})));
        let recognizer =
            ScriptedRecognizer::new(vec![Ok(json!([{"page": 1}, {"page": 2}]))]);

        let output = TencentOcrNode::execute_with(&ctx, &recognizer)
            .await
            .expect("execution succeeds");

        let branch = &output[0];
        assert_eq!(branch.len(), 2);
        assert_eq!(branch[0].json, json!({"page": 1}));
        assert_eq!(branch[1].json, json!({"page": 2}));
        assert!(branch.iter().all(|item| item.paired_item == 0));
    }

    #[tokio::test]
    async fn successful_result_passes_through_unmodified() {
        let result = json!({
            "RequestId": "req-1",
            "MixedInvoiceItems": [{"Type": "VatInvoice", "Angle": 0.5}],
        });
        let ctx = MemoryContext::new("Tencent OCR").with_item(item(json!({"data": "AAA"})));
        let recognizer = ScriptedRecognizer::new(vec![Ok(result.clone())]);

        let output = TencentOcrNode::execute_with(&ctx, &recognizer)
            .await
            .expect("execution succeeds");

        assert_eq!(output[0][0].json, result);
    }

    #[tokio::test]
    async fn empty_input_yields_empty_branch() {
        let ctx = MemoryContext::new("Tencent OCR");
        let recognizer = ScriptedRecognizer::new(Vec::new());

        let output = TencentOcrNode::execute_with(&ctx, &recognizer)
            .await
            .expect("execution succeeds");

        assert_eq!(output, vec![Vec::<OutputItem>::new()]);
    }
}
