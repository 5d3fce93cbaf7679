//! 정적 자격증명 저장소.
//!
//! 기동 시 설정에서 읽은 사용자 목록을 그대로 보관하며 런타임 중 변경되지 않습니다.
//! 비밀번호 해싱이나 잠금 정책은 없습니다.

use std::collections::HashMap;

use blueprint_core::UserCredential;

/// 사용자 자격증명 조회 인터페이스.
pub trait CredentialStore: Send + Sync {
    /// 사용자 이름과 비밀번호가 정확히 일치하는 항목이 있는지 확인.
    fn is_valid(&self, username: &str, password: &str) -> bool;
}

/// 메모리 기반 자격증명 저장소.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    users: HashMap<String, String>,
}

impl InMemoryCredentialStore {
    pub fn new<I>(users: I) -> Self
    where
        I: IntoIterator<Item = UserCredential>,
    {
        Self {
            users: users
                .into_iter()
                .map(|u| (u.username, u.password))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn is_valid(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }
}
