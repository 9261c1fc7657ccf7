//! 파일 목록 필터
//!
//! 필터 문자열은 `"all"` 또는 경로에 대한 정규식입니다.
//! 정규식으로 컴파일되지 않는 문자열은 이름에 대한 글로브 패턴으로 취급합니다
//! (`*` 0개 이상, `?` 정확히 1개, 대소문자 무시).

use regex::Regex;

/// 모든 파일을 보여주는 필터 값
pub const FILTER_ALL: &str = "all";

/// 컴파일된 파일 필터
///
/// 폴더는 필터와 무관하게 항상 통과합니다. 이 타입은 파일에만 적용됩니다.
#[derive(Debug, Clone, Default)]
pub enum FileFilter {
    /// 모든 파일 허용
    #[default]
    All,
    /// 경로에 대한 정규식 (부분 일치)
    Pattern(Regex),
    /// 이름에 대한 글로브 패턴 (정규식 컴파일 실패 시)
    Glob(Regex),
}

impl FileFilter {
    /// 필터 문자열 파싱
    pub fn parse(pattern: &str) -> Self {
        if pattern == FILTER_ALL {
            return FileFilter::All;
        }
        match Regex::new(pattern) {
            Ok(re) => FileFilter::Pattern(re),
            Err(err) => {
                tracing::debug!(pattern, %err, "filter is not a regex, using glob matching");
                match glob_regex(pattern) {
                    Ok(glob) => FileFilter::Glob(glob),
                    Err(err) => {
                        tracing::warn!(pattern, %err, "unusable filter, showing all files");
                        FileFilter::All
                    }
                }
            }
        }
    }

    /// 파일이 필터를 통과하는지 확인
    pub fn accepts(&self, name: &str, path: &str) -> bool {
        match self {
            FileFilter::All => true,
            FileFilter::Pattern(re) => re.is_match(path),
            FileFilter::Glob(glob) => glob.is_match(name),
        }
    }
}

/// 글로브 패턴을 이름 전체에 대한 정규식으로 변환
///
/// `*`와 `?` 외의 문자는 모두 이스케이프합니다. 매칭은 `regex` 엔진이 하므로
/// 패턴 길이와 무관하게 입력 길이에 선형입니다.
pub fn glob_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push_str("(?is)^");
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            _ => source.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    source.push('$');
    Regex::new(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_accepts_everything() {
        let filter = FileFilter::parse("all");
        assert!(matches!(filter, FileFilter::All));
        assert!(filter.accepts("x.bin", "/tmp/x.bin"));
    }

    #[test]
    fn test_regex_matches_path() {
        let filter = FileFilter::parse(r"\.ktr$|\.kjb$");
        assert!(filter.accepts("load.ktr", "/etl/load.ktr"));
        assert!(filter.accepts("main.kjb", "/etl/main.kjb"));
        assert!(!filter.accepts("notes.txt", "/etl/notes.txt"));
    }

    #[test]
    fn test_regex_is_unanchored() {
        let filter = FileFilter::parse("etl");
        assert!(filter.accepts("a.txt", "/etl/a.txt"));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_glob() {
        let filter = FileFilter::parse("*.TXT");
        assert!(matches!(filter, FileFilter::Glob(_)));
        assert!(filter.accepts("readme.txt", "/docs/readme.txt"));
        assert!(!filter.accepts("readme.md", "/docs/readme.md"));
    }

    fn glob(pattern: &str, name: &str) -> bool {
        glob_regex(pattern).unwrap().is_match(name)
    }

    #[test]
    fn test_glob_wildcards() {
        assert!(glob("?.rs", "a.rs"));
        assert!(!glob("?.rs", "ab.rs"));
        assert!(glob("t*t", "tt"));
        assert!(glob("*", ""));
        assert!(glob("**", "abc"));
        assert!(!glob("", "a"));
        assert!(glob("*.txt", "한글파일.txt"));
        assert!(!glob("*.txt", "notes.txt.bak"));
    }

    #[test]
    fn test_glob_escapes_regex_syntax() {
        assert!(glob("*(1).txt", "report(1).txt"));
        assert!(!glob("*(1).txt", "report1.txt"));
        assert!(glob("a+b*", "a+b.csv"));
        assert!(!glob("a+b*", "aab.csv"));
    }

    /// 별표가 많은 패턴도 긴 이름에서 곧바로 끝나야 함
    #[test]
    fn test_glob_many_stars_is_linear() {
        let filter = FileFilter::parse("*a*a*a*a*a*a*a*a*a*a*b");
        assert!(matches!(filter, FileFilter::Glob(_)));

        let name = "a".repeat(40);
        let started = std::time::Instant::now();
        assert!(!filter.accepts(&name, &format!("/docs/{}", name)));
        assert!(filter.accepts(&format!("{}b", name), "/docs/x"));
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }
}
