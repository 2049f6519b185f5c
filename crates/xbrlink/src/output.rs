use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use xbrlink_control::{Exchange, ResponseCode, Status};
use xbrlink_frame::{CommandFrame, WireFormat};
use xbrlink_transport::PortInfo;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// A single-record command result.
pub trait Report: Serialize {
    /// Labelled values, in display order.
    fn rows(&self) -> Vec<(&'static str, String)>;
    /// What `--format raw` writes to stdout.
    fn raw(&self) -> Vec<u8>;
}

/// Outcome of a named television operation.
#[derive(Serialize)]
pub struct OperationOutput<'a> {
    pub operation: &'a str,
    pub port: String,
    pub code: String,
    pub status: Status,
}

impl<'a> OperationOutput<'a> {
    pub fn new(operation: &'a str, port: String, code: ResponseCode) -> Self {
        Self {
            operation,
            port,
            code: code.as_hex(),
            status: Status::from_code(code),
        }
    }
}

impl Report for OperationOutput<'_> {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("operation", self.operation.to_string()),
            ("port", self.port.clone()),
            ("code", self.code.clone()),
            ("status", self.status.to_string()),
        ]
    }

    fn raw(&self) -> Vec<u8> {
        format!("{}\n", self.code).into_bytes()
    }
}

/// Everything seen during a raw `send` transaction.
#[derive(Serialize)]
pub struct ExchangeOutput {
    pub port: String,
    pub command: String,
    pub frame: String,
    pub wire: &'static str,
    pub response: String,
    pub code: String,
    pub status: Status,
    pub checksum_ok: Option<bool>,
}

impl ExchangeOutput {
    pub fn new(port: String, command: String, wire: WireFormat, exchange: &Exchange) -> Self {
        Self {
            port,
            command,
            frame: exchange.frame.to_hex(),
            wire: wire.name(),
            response: exchange.response.to_hex(),
            code: exchange.code().as_hex(),
            status: exchange.status,
            checksum_ok: exchange.response.checksum_ok(),
        }
    }
}

impl Report for ExchangeOutput {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("port", self.port.clone()),
            ("command", self.command.clone()),
            ("frame", self.frame.clone()),
            ("response", self.response.clone()),
            ("code", self.code.clone()),
            ("status", self.status.to_string()),
            ("checksum", checksum_label(self.checksum_ok).to_string()),
        ]
    }

    fn raw(&self) -> Vec<u8> {
        format!("{}\n", self.response).into_bytes()
    }
}

/// An assembled frame, built without touching a port.
#[derive(Serialize)]
pub struct FrameOutput {
    pub command: String,
    pub frame: String,
    pub wire: &'static str,
    pub length: usize,
    pub padding: usize,
    pub checksum: String,
    #[serde(skip)]
    pub encoded: Vec<u8>,
}

impl FrameOutput {
    pub fn new(command: String, frame: &CommandFrame, wire: WireFormat) -> Self {
        Self {
            command,
            frame: frame.to_hex(),
            wire: wire.name(),
            length: frame.len(),
            padding: frame.padding(),
            checksum: format!("{:02X}", frame.checksum()),
            encoded: frame.encode(wire).to_vec(),
        }
    }
}

impl Report for FrameOutput {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("command", self.command.clone()),
            ("frame", self.frame.clone()),
            ("length", self.length.to_string()),
            ("padding", self.padding.to_string()),
            ("checksum", self.checksum.clone()),
        ]
    }

    fn raw(&self) -> Vec<u8> {
        self.encoded.clone()
    }
}

#[derive(Serialize)]
pub struct ChecksumOutput {
    pub fields: Vec<String>,
    pub checksum: String,
}

impl Report for ChecksumOutput {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fields", self.fields.join(" ")),
            ("checksum", self.checksum.clone()),
        ]
    }

    fn raw(&self) -> Vec<u8> {
        format!("{}\n", self.checksum).into_bytes()
    }
}

pub fn print_report<R: Report>(report: &R, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let rows = report.rows();
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(rows.iter().map(|(label, _)| label.to_uppercase()))
                .add_row(rows.into_iter().map(|(_, value)| value));
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let line: Vec<String> = report
                .rows()
                .into_iter()
                .map(|(label, value)| format!("{label}={value}"))
                .collect();
            println!("{}", line.join(" "));
        }
        OutputFormat::Raw => print_raw(&report.raw()),
    }
}

#[derive(Serialize)]
struct PortOutput<'a> {
    name: &'a str,
    kind: &'a str,
    product: Option<&'a str>,
}

pub fn print_ports(ports: &[PortInfo], format: OutputFormat) {
    let out: Vec<PortOutput<'_>> = ports
        .iter()
        .map(|port| PortOutput {
            name: &port.name,
            kind: port.kind,
            product: port.product.as_deref(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "KIND", "PRODUCT"]);
            for port in &out {
                table.add_row(vec![
                    port.name.to_string(),
                    port.kind.to_string(),
                    port.product.unwrap_or("-").to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for port in &out {
                println!(
                    "{} kind={} product={}",
                    port.name,
                    port.kind,
                    port.product.unwrap_or("-")
                );
            }
        }
        OutputFormat::Raw => {
            for port in &out {
                println!("{}", port.name);
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn checksum_label(ok: Option<bool>) -> &'static str {
    match ok {
        Some(true) => "ok",
        Some(false) => "mismatch",
        None => "missing",
    }
}
