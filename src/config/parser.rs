use super::{Error, OverflowPolicy, Result};
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use std::{fs, net, path, str};

fn rangestr(inner: &str, outer: &str) -> Range<usize> {
    let ilen = inner.len();
    let inner = inner.as_ptr() as usize;
    let outer = outer.as_ptr() as usize;
    let offset = inner - outer;
    offset..offset + ilen
}

pub trait TypeName {
    fn type_name() -> String;
}

impl TypeName for usize {
    fn type_name() -> String {
        format!("a positive integer (and lower than {})", usize::max_value())
    }
}

impl TypeName for String {
    fn type_name() -> String { "a string".to_owned() }
}

impl TypeName for net::IpAddr {
    fn type_name() -> String { "an IPv4 or IPv6 address".to_owned() }
}

impl TypeName for OverflowPolicy {
    fn type_name() -> String { "\"clear\" or \"close\"".to_owned() }
}

impl str::FromStr for OverflowPolicy {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "clear" => Ok(Self::Clear),
            "close" => Ok(Self::Close),
            _ => Err(()),
        }
    }
}

/// Reads settings written as `key value`, one per line.  Lines starting with `#` are comments.
#[derive(Default, Debug)]
pub struct Parser {
    lines: Vec<String>,
    settings: BTreeMap<usize, Setting>,
    occurences: HashMap<String, Vec<usize>>,
}

#[derive(Debug, Clone)]
pub struct Setting {
    pub lineno: usize,
    pub krange: Range<usize>,
    pub vrange: Range<usize>,
}

impl Parser {
    pub fn read<P>(path: P) -> Result<Self>
        where P: AsRef<path::Path>
    {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let lines = contents.lines().map(str::to_owned).collect();
        let mut res = Self { lines, ..Self::default() };

        for (lineno, line) in res.lines.iter().enumerate() {
            let mut split = line.splitn(2, ' ').map(str::trim).filter(|s| !s.is_empty());

            let key = if let Some(key) = split.next() {key} else {continue};
            if key.starts_with('#') { continue; }
            let krange = rangestr(key, line);

            let value = if let Some(value) = split.next() {
                value
            } else {
                return Err(res.error(lineno, krange, "this setting has no value"));
            };
            let vrange = rangestr(value, line);

            res.settings.insert(lineno, Setting { lineno, krange, vrange });
            res.occurences.entry(key.to_owned()).or_default().push(lineno);
        }

        Ok(res)
    }

    pub fn unique_setting<S, F>(mut self, key: &str, required: bool, and_then: F) -> Result<Self>
        where S: str::FromStr + TypeName,
              F: FnOnce(S),
    {
        if let Some(occ) = self.occurences.get(key) {
            if occ.is_empty() {
                unreachable!("occurences must not have empty Vecs");
            }
            if occ.len() > 1 {
                let last = occ[occ.len() - 1];
                let setting = &self.settings[&last];
                let krange = setting.krange.clone();
                let msg = format!("{:?} must not appear more than once. Specified at lines {:?}",
                                  key, occ.iter().map(|lno| lno + 1).collect::<Vec<_>>());
                return Err(self.error(last, krange, msg));
            }
            let lineno = occ[0];
            let setting = &self.settings[&lineno];
            let value = match self.lines[lineno][setting.vrange.clone()].parse() {
                Ok(value) => value,
                Err(_) => {
                    let msg = format!("this setting must be {}", S::type_name());
                    let vrange = setting.vrange.clone();
                    return Err(self.error(lineno, vrange, msg));
                }
            };
            and_then(value);
        } else if required {
            return Err(Error::Format(self, None, 0..0, format!("missing setting {:?}", key)));
        }
        self.occurences.remove(key);
        Ok(self)
    }

    pub fn check_unknown_settings(self) -> Result<()> {
        let first_unknown = self.occurences.iter()
            .map(|(key, occ)| (occ[0], key.clone()))
            .min();
        if let Some((lineno, key)) = first_unknown {
            let krange = self.settings[&lineno].krange.clone();
            let msg = format!("unknown setting {:?}", key);
            return Err(self.error(lineno, krange, msg));
        }
        Ok(())
    }

    pub fn error<S>(self, lineno: usize, col: Range<usize>, msg: S) -> Error
        where S: Into<String>
    {
        Error::Format(self, Some(lineno), col, msg.into())
    }

    pub fn lines(&self) -> impl Iterator<Item=&str> + '_ {
        self.lines.iter().map(String::as_ref)
    }
}
