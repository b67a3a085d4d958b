use crate::application::SweepUseCase;
use crate::domain::sweep::{FileControls, UploadedFile, WidgetState};
use crate::infrastructure::config::SweeperConfig;
use actix_cors::Cors;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use base64::Engine as _;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

/// Bounded in-memory log served at `/api/logs`
pub struct LogBook {
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
}

impl LogBook {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    pub fn add(&self, level: &str, source: &str, message: &str) -> LogEntry {
        match level {
            "ERROR" => tracing::error!(source, "{}", message),
            "WARN" => tracing::warn!(source, "{}", message),
            _ => tracing::info!(source, "{}", message),
        }

        let entry = LogEntry {
            time: Local::now().format("%H:%M:%S").to_string(),
            level: level.to_string(),
            source: source.to_string(),
            message: message.to_string(),
        };
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push_back(entry.clone());
        while entries.len() > self.capacity {
            entries.pop_front();
        }
        entry
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().cloned().collect()
    }
}

pub struct HttpState {
    pub sweep_use_case: Arc<SweepUseCase>,
    pub logs: Arc<LogBook>,
}

impl HttpState {
    pub fn new(sweep_use_case: SweepUseCase, logs: Arc<LogBook>) -> Self {
        Self {
            sweep_use_case: Arc::new(sweep_use_case),
            logs,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UploadPayload {
    pub name: String,
    /// Base64 encoded file bytes
    pub content: String,
}

impl UploadPayload {
    fn into_upload(self) -> Result<UploadedFile, String> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(self.content.as_bytes())
            .map_err(|e| format!("Invalid base64 content for {}: {}", self.name, e))?;
        Ok(UploadedFile::new(self.name, bytes))
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub files: Vec<UploadPayload>,
    #[serde(default)]
    pub widgets: WidgetState,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub file: UploadPayload,
    #[serde(default)]
    pub controls: FileControls,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[post("/render")]
async fn render(data: web::Data<HttpState>, req: web::Json<RenderRequest>) -> impl Responder {
    let RenderRequest { files, widgets } = req.into_inner();

    let uploads = match files
        .into_iter()
        .map(UploadPayload::into_upload)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(uploads) => uploads,
        Err(err) => {
            data.logs.add("ERROR", "HttpApi", &err);
            return HttpResponse::BadRequest().body(err);
        }
    };

    data.logs.add(
        "INFO",
        "HttpApi",
        &format!("Rendering {} uploaded file(s)", uploads.len()),
    );

    let use_case = data.sweep_use_case.clone();
    let joined =
        tokio::task::spawn_blocking(move || use_case.render(&uploads, &widgets)).await;

    match joined {
        Ok(output) => {
            for report in output.files.iter().filter(|r| r.has_errors()) {
                data.logs.add(
                    "WARN",
                    "Sweeper",
                    &format!("{} was not fully processed", report.name),
                );
            }
            HttpResponse::Ok().json(output)
        }
        Err(err) => {
            data.logs.add(
                "ERROR",
                "HttpApi",
                &format!("Render worker failed: {}", err),
            );
            HttpResponse::InternalServerError().body(err.to_string())
        }
    }
}

#[post("/export")]
async fn export(data: web::Data<HttpState>, req: web::Json<ExportRequest>) -> impl Responder {
    let ExportRequest { file, controls } = req.into_inner();

    let upload = match file.into_upload() {
        Ok(upload) => upload,
        Err(err) => {
            data.logs.add("ERROR", "HttpApi", &err);
            return HttpResponse::BadRequest().body(err);
        }
    };

    data.logs.add(
        "INFO",
        "HttpApi",
        &format!(
            "Exporting {} as {}",
            upload.name, controls.conversion_type
        ),
    );

    let use_case = data.sweep_use_case.clone();
    let joined = tokio::task::spawn_blocking(move || use_case.export(&upload, &controls)).await;

    match joined {
        Ok(Ok(artifact)) => HttpResponse::Ok()
            .content_type(artifact.mime_type.clone())
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(artifact.file_name.clone())],
            })
            .body(artifact.bytes),
        Ok(Err(err)) => {
            data.logs.add(
                "ERROR",
                "HttpApi",
                &format!("Export failed: {}", err),
            );
            HttpResponse::UnprocessableEntity().body(err.to_string())
        }
        Err(err) => {
            data.logs.add(
                "ERROR",
                "HttpApi",
                &format!("Export worker failed: {}", err),
            );
            HttpResponse::InternalServerError().body(err.to_string())
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.logs.snapshot())
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// Routes under `/api`, shared by the server and the tests
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(render)
            .service(export)
            .service(get_logs)
            .service(health),
    );
}

/// JSON body limit: base64 grows uploads by a third, plus room for widget state
fn json_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes
        .saturating_mul(4)
        .saturating_div(3)
        .saturating_add(64 * 1024)
}

pub fn start_server(config: &SweeperConfig, logs: Arc<LogBook>) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState::new(
        SweepUseCase::new(config.preview_rows),
        logs,
    ));
    let json_config = web::JsonConfig::default().limit(json_limit(config.max_upload_bytes));

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(json_config.clone())
            .configure(routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
