//! Fixed reply texts sent back to the LINE user.

/// Reply sent when a text message is not a URL.
pub const PROMPT_FOR_URL: &str = "URLを入力してね";

/// Reply sent when the title fetch or the Notion write fails.
pub const REGISTRATION_FAILED: &str = "Notionへの登録に失敗しました。";

/// Reply sent once the link has been saved.
pub const REGISTRATION_SUCCEEDED: &str = "Notionに登録したよ ✨";

/// Reply describing a received sticker.
pub fn sticker_description(sticker_id: &str, sticker_resource_type: &str) -> String {
    format!("sticker id is {sticker_id}, stickerResourceType is {sticker_resource_type}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticker_description() {
        assert_eq!(sticker_description("52002734", "STATIC"), "sticker id is 52002734, stickerResourceType is STATIC");
    }
}
