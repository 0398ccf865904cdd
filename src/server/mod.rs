pub mod page;

use actix_web::{
    http::header::{self, ContentDisposition, DispositionParam, DispositionType},
    web, App, HttpResponse, HttpServer,
};
use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    config::QrConfig,
    download::{BlobHandle, DownloadOutcome, SaveTarget},
    error::Result,
    session::QrSession,
};

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub text: String,
}

/// Captures a download so it can be sent back as an attachment.
#[derive(Default)]
struct AttachmentTarget {
    file: Option<(String, String, Vec<u8>)>,
}

#[async_trait]
impl SaveTarget for AttachmentTarget {
    async fn save(&mut self, blob: &BlobHandle) -> Result<()> {
        let content_type = blob.content_type().unwrap_or("image/png").to_string();
        self.file = Some((blob.filename().to_string(), content_type, blob.bytes().to_vec()));
        Ok(())
    }
}

fn back_to_page() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

async fn index(session: web::Data<QrSession>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::render_page(&session.snapshot()))
}

async fn generate(session: web::Data<QrSession>, form: web::Form<GenerateForm>) -> HttpResponse {
    let outcome = session.submit_text(form.into_inner().text).await;
    log::debug!("Submit finished: {:?}", outcome);
    back_to_page()
}

async fn clear(session: web::Data<QrSession>) -> HttpResponse {
    session.clear();
    back_to_page()
}

async fn download(session: web::Data<QrSession>) -> HttpResponse {
    let mut target = AttachmentTarget::default();
    let outcome = session.download(&mut target).await;

    match (outcome, target.file) {
        (DownloadOutcome::Saved { .. }, Some((filename, content_type, bytes))) => {
            HttpResponse::Ok()
                .content_type(content_type)
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(filename)],
                })
                .body(bytes)
        }
        _ => back_to_page(),
    }
}

async fn state(session: web::Data<QrSession>) -> HttpResponse {
    HttpResponse::Ok().json(session.snapshot())
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/generate", web::post().to(generate))
        .route("/clear", web::post().to(clear))
        .route("/download", web::get().to(download))
        .route("/api/state", web::get().to(state));
}

pub async fn run(config: QrConfig) -> Result<()> {
    let session = web::Data::new(QrSession::new(&config)?);
    let port = config.port();

    log::info!("🌐 Serving the QR form on http://127.0.0.1:{}", port);

    HttpServer::new(move || App::new().app_data(session.clone()).configure(routes))
        .bind(("127.0.0.1", port))?
        .run()
        .await?;

    Ok(())
}
