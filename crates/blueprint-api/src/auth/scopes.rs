//! 스코프 기반 접근 제어.
//!
//! 토큰의 `scope` 클레임은 공백으로 구분된 스코프 문자열입니다.

use std::collections::BTreeSet;

/// 엔드포인트가 요구하는 스코프.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// 블루프린트 조회 (목록/단건)
    BlueprintsRead,
    /// 블루프린트 생성/수정/삭제
    BlueprintsWrite,
}

impl Scope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Scope::BlueprintsRead => "blueprints.read",
            Scope::BlueprintsWrite => "blueprints.write",
        }
    }

    /// 문자열에서 스코프 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "blueprints.read" => Some(Scope::BlueprintsRead),
            "blueprints.write" => Some(Scope::BlueprintsWrite),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 로그인한 모든 사용자에게 부여되는 스코프.
///
/// 사용자별 스코프 구분은 없습니다.
pub const GRANTED_SCOPES: &str = "blueprints.read blueprints.write";

/// 스코프 문자열을 개별 토큰 집합으로 분리.
pub fn parse_scopes(granted: &str) -> BTreeSet<String> {
    granted.split_whitespace().map(str::to_owned).collect()
}

/// `granted`에 `required` 스코프가 포함되어 있는지 확인.
///
/// 부분 문자열이 아닌 공백 구분 토큰 단위로 비교합니다.
pub fn has_scope(granted: &str, required: Scope) -> bool {
    granted
        .split_whitespace()
        .any(|token| token == required.as_str())
}
