#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_archive::mapper::to_storable;
use scholar_archive::models::ArticleDto;

fuzz_target!(|data: &[u8]| {
    // Parse and map must return Ok or Err, never panic
    if let Ok(dto) = serde_json::from_slice::<ArticleDto>(data) {
        let _ = to_storable(&dto);
    }
});
