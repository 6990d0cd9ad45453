mod address_parser_test;
mod header_parser_test;
mod uri_parser_test;
