use futures_lite::stream;
use tide::http::StatusCode;
use tide::Request;

use crate::pages::upload::UploadFile;

/// Multipart field the upload form's file input uses.
pub(super) const UPLOAD_FIELD: &str = "photos";

fn bad_request(err: multer::Error) -> tide::Error {
    tide::Error::new(StatusCode::BadRequest, err)
}

/// Reads the chosen files out of a `multipart/form-data` upload, keeping the
/// order the browser sent them in.
pub(super) async fn upload_files(req: &mut Request<crate::State>) -> tide::Result<Vec<UploadFile>> {
    let content_type = req
        .header("Content-Type")
        .map(|values| values.last().as_str().to_string())
        .ok_or_else(|| tide::Error::from_str(StatusCode::BadRequest, "missing content type"))?;
    let boundary = multer::parse_boundary(&content_type).map_err(bad_request)?;

    let body = req.body_bytes().await?;
    let mut multipart =
        multer::Multipart::new(stream::once(Ok::<_, std::io::Error>(body)), boundary);

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // Browsers send an empty part when nothing was chosen.
        let name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let data = field.bytes().await.map_err(bad_request)?;
        files.push(UploadFile {
            name,
            data: data.to_vec(),
        });
    }

    Ok(files)
}
