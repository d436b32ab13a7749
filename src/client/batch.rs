use std::future::Future;

use futures::future::join_all;
use serde_json::Value;

use crate::error::{BatchError, RequestError};

/// Run every request concurrently and wait for all of them.
/// All-or-nothing: a single failure fails the batch and no results are returned.
pub async fn fan_out<I, F>(requests: I) -> Result<Vec<Value>, BatchError>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<Value, RequestError>>,
{
    let results = join_all(requests).await;
    let total = results.len();

    let mut responses = Vec::with_capacity(total);
    let mut failed = 0;
    let mut first = None;
    for result in results {
        match result {
            Ok(value) => responses.push(value),
            Err(e) => {
                failed += 1;
                first.get_or_insert(e);
            }
        }
    }

    match first {
        Some(first) => {
            tracing::warn!("{} of {} batched requests failed", failed, total);
            Err(BatchError { failed, total, first })
        }
        None => Ok(responses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HttpMethod;
    use serde_json::json;

    fn ok(n: i64) -> impl Future<Output = Result<Value, RequestError>> {
        async move { Ok(json!({ "n": n })) }
    }

    fn failed(path: &str) -> impl Future<Output = Result<Value, RequestError>> {
        let err = RequestError::Transport {
            method: HttpMethod::Delete,
            path: path.to_string(),
            reason: "down".into(),
        };
        async move { Err(err) }
    }

    #[tokio::test]
    async fn all_success_keeps_order() {
        let responses = fan_out(vec![ok(1), ok(2), ok(3)]).await.unwrap();
        assert_eq!(responses, vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 3})]);
    }

    #[tokio::test]
    async fn one_failure_fails_the_batch() {
        let requests: Vec<futures::future::BoxFuture<'static, _>> = vec![
            Box::pin(ok(1)),
            Box::pin(failed("/admin/user/delete")),
            Box::pin(ok(3)),
        ];
        let err = fan_out(requests).await.unwrap_err();
        assert_eq!(err.failed, 1);
        assert_eq!(err.total, 3);
        assert_eq!(err.first.path(), "/admin/user/delete");
    }

    #[tokio::test]
    async fn empty_batch_succeeds() {
        let requests: Vec<futures::future::Ready<Result<Value, RequestError>>> = Vec::new();
        assert!(fan_out(requests).await.unwrap().is_empty());
    }
}
