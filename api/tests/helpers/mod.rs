
pub use app::{
    authed_request, json_body, make_test_app, multipart_upload_request, seed_user, send,
};
