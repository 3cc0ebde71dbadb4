//! 目标 URL 归属解析：子域名 / 主域名 / 公共后缀
use url::{Host, Url};

/// 目标主机的归属拆分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality {
    /// 子域名（可能为空，例如 example.com）
    pub subdomain: String,
    /// 可注册域名去掉公共后缀后的部分
    pub domain: String,
    /// 公共后缀（co.uk / com ...）
    pub tld: String,
}

impl Locality {
    /// 尽力解析目标 URL；解析失败返回 None，由调用方决定降级
    /// 拆分使用 URL 中原样书写的主机名（保留大小写与非 ASCII 字符）
    pub fn parse(target: &str) -> Option<Self> {
        let target = target.trim();
        let parsed = Url::parse(target).ok()?;
        // IP 主机没有域名归属
        let normalized = match parsed.host()? {
            Host::Domain(domain) => domain,
            Host::Ipv4(_) | Host::Ipv6(_) => return None,
        };
        let host = raw_host(target)
            .filter(|raw| !raw.is_empty())
            .unwrap_or(normalized);
        Self::from_host(host)
    }

    /// 按公共后缀列表拆分主机名，各部分保留原始书写
    pub fn from_host(host: &str) -> Option<Self> {
        let host = host.trim_end_matches('.');
        // ASCII 小写化不改变字节长度，按长度回切原始主机名
        let lowered = host.to_ascii_lowercase();
        let tld_len = psl::suffix_str(&lowered)?.len();
        let registrable_len = psl::domain_str(&lowered)?.len();
        if registrable_len <= tld_len + 1 || registrable_len > host.len() {
            return None;
        }

        let registrable = &host[host.len() - registrable_len..];
        let tld = &host[host.len() - tld_len..];
        let domain = &registrable[..registrable_len - tld_len - 1];
        let subdomain = host[..host.len() - registrable_len].trim_end_matches('.');

        Some(Self {
            subdomain: subdomain.to_string(),
            domain: domain.to_string(),
            tld: tld.to_string(),
        })
    }
}

/// 取出 URL 权限段中原样书写的主机名（去掉用户信息与端口）
fn raw_host(target: &str) -> Option<&str> {
    let (_, rest) = target.split_once(':')?;
    let rest = rest.trim_start_matches(['/', '\\']);
    let authority = rest.split(['/', '?', '#', '\\']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = host_port.rsplit_once(':').map_or(host_port, |(host, _)| host);
    Some(host)
}
