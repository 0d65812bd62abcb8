use std::time::{Duration, SystemTime};

use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream};

use crate::{adapters, error::ObjectError, model, util};

impl adapters::ObjectStore for aws_sdk_s3::Client {
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectError> {
        let req = self
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body));

        util::poll::poll_until_ready(req.send())?.map_err(|err| ObjectError::PutObject {
            key: key.to_string(),
            message: DisplayErrorContext(&err).to_string(),
        })?;

        Ok(())
    }

    fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<model::object::StoredObject>, ObjectError> {
        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut req = self.list_objects_v2().bucket(bucket).prefix(prefix);

            if let Some(tok) = continuation_token {
                req = req.continuation_token(tok);
            }

            let lo = util::poll::poll_until_ready(req.send())?.map_err(|err| {
                ObjectError::ListObjects {
                    prefix: prefix.to_string(),
                    message: DisplayErrorContext(&err).to_string(),
                }
            })?;

            for o in lo.contents() {
                let modified_time = match o.last_modified() {
                    Some(lm) if lm.secs() >= 0 => {
                        SystemTime::UNIX_EPOCH + Duration::new(lm.secs() as u64, lm.subsec_nanos())
                    }
                    _ => SystemTime::UNIX_EPOCH,
                };

                objects.push(model::object::StoredObject {
                    key: o.key().unwrap_or("").to_string(),
                    size: o.size().unwrap_or(0).max(0) as u64,
                    modified_time,
                    etag: o.e_tag().map(|etag| etag.to_string()),
                });
            }

            continuation_token = lo.next_continuation_token().map(|tok| tok.to_string());
            if continuation_token.is_none() {
                break;
            }
        }

        Ok(objects)
    }
}
