/// Prompt shown before a destructive action, the action is only carried out on `true`.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

pub const DELETE_RECORD: &str = "정말 삭제하시겠습니까?";
pub const DELETE_MEMO: &str = "메모를 삭제하시겠습니까?";
pub const DELETE_PHOTO: &str = "사진을 삭제하시겠습니까?";
pub const DELETE_FILE: &str = "파일을 삭제하시겠습니까?";
