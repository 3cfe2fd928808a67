#![allow(dead_code)]

use async_trait::async_trait;
use chartform_groups::{
    DefinitionSource, Error, FormGroup, ResourceKind, Result, StructureDefinition,
    StructureGroupBuilder,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// What the stub hands back for one resource type
#[derive(Clone)]
pub enum Stub {
    Document(Value),
    Status(u16),
    Garbage,
}

/// In-memory source; unknown types answer 404
#[derive(Default)]
pub struct StubSource {
    documents: HashMap<String, Stub>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resource_type: &str, stub: Stub) -> Self {
        self.documents.insert(resource_type.to_string(), stub);
        self
    }

    pub fn with_definition(self, definition: Value) -> Self {
        let resource_type = definition["type"]
            .as_str()
            .expect("definition needs a type")
            .to_string();
        self.with(&resource_type, Stub::Document(definition))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DefinitionSource for StubSource {
    async fn fetch_definition(&self, kind: &ResourceKind) -> Result<StructureDefinition> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.documents.get(kind.name()) {
            Some(Stub::Document(value)) => Ok(StructureDefinition::from_value(value.clone())?),
            Some(Stub::Garbage) => Ok(StructureDefinition::from_slice(b"<html>oops</html>")?),
            Some(Stub::Status(status)) => Err(Error::Status {
                url: self.location(kind),
                status: *status,
            }),
            None => Err(Error::Status {
                url: self.location(kind),
                status: 404,
            }),
        }
    }

    fn location(&self, kind: &ResourceKind) -> String {
        format!("stub://{}", kind.definition_file_name())
    }
}

pub fn builder(source: StubSource) -> (StructureGroupBuilder, Arc<StubSource>) {
    let source = Arc::new(source);
    (StructureGroupBuilder::new(source.clone()), source)
}

/// Snapshot element JSON
pub fn element(path: &str, codes: &[&str]) -> Value {
    let mut element = json!({ "id": path, "path": path, "min": 0, "max": "1" });
    if !codes.is_empty() {
        let types: Vec<Value> = codes.iter().map(|c| json!({ "code": c })).collect();
        element["type"] = Value::Array(types);
    }
    element
}

/// StructureDefinition JSON for `resource_type` with the given snapshot
pub fn definition(resource_type: &str, elements: Vec<Value>) -> Value {
    json!({
        "resourceType": "StructureDefinition",
        "id": resource_type,
        "url": format!("http://hl7.org/fhir/StructureDefinition/{}", resource_type),
        "name": resource_type,
        "kind": "resource",
        "type": resource_type,
        "snapshot": { "element": elements }
    })
}

pub fn ids(groups: &[FormGroup]) -> Vec<&str> {
    groups.iter().map(|g| g.id.as_str()).collect()
}

pub fn group<'a>(groups: &'a [FormGroup], id: &str) -> &'a FormGroup {
    groups
        .iter()
        .find(|g| g.id == id)
        .unwrap_or_else(|| panic!("no group {} in {:?}", id, ids(groups)))
}

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

/// One canned HTTP response, matched on the request path
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: Vec<u8>,
}

/// Serve `routes` on an ephemeral local port; unmatched paths answer 404.
/// Returns the base URL.
pub async fn serve(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = routes
                    .iter()
                    .find(|r| r.path == path)
                    .map(|r| (r.status, r.body.clone()))
                    .unwrap_or((404, b"not found".to_vec()));

                let head = format!(
                    "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    if status < 400 { "OK" } else { "Error" },
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes()).await;
                let _ = stream.write_all(&body).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}
